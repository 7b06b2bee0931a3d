//! Terminal rendering of organizations and chat sessions.
//!
//! The chat view prints the existing log once, then every turn as it is
//! appended, so the newest turn is always the last line on screen.

use std::sync::Arc;

use orgbot_chat::{Rejection, SessionEvent, SessionManager, Speaker, SubmitOutcome, Turn};
use orgbot_core::OrganizationRecord;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinSet;

/// One line of the transcript.
pub fn render_turn(turn: &Turn, timestamp_format: &str) -> String {
    let who = match turn.speaker {
        Speaker::User => "you",
        Speaker::Assistant => "bot",
    };
    format!(
        "[{}] {}: {}",
        turn.created_at.format(timestamp_format),
        who,
        turn.text
    )
}

pub fn chat_title(record: Option<&OrganizationRecord>) -> String {
    match record {
        Some(record) => format!("Chat with {}", record.name),
        None => "Chat Interface".to_string(),
    }
}

pub fn render_organizations(records: &[OrganizationRecord]) -> String {
    if records.is_empty() {
        return "No organizations yet. Create one with `orgbot create`.".to_string();
    }
    // Format widths count chars, so measure in chars too.
    let id_width = records.iter().map(|r| r.id.chars().count()).max().unwrap_or(2).max(2);
    let name_width = records.iter().map(|r| r.name.chars().count()).max().unwrap_or(4).max(4);

    let mut out = format!(
        "{:<id_width$}  {:<name_width$}  {:<10}  {}\n",
        "ID", "NAME", "CREATED", "LOCATION"
    );
    for r in records {
        out.push_str(&format!(
            "{:<id_width$}  {:<name_width$}  {:<10}  {}\n",
            r.id,
            r.name,
            r.created_at.format("%Y-%m-%d"),
            r.location
        ));
        if !r.description.is_empty() {
            out.push_str(&format!("{:<id_width$}  {}\n", "", r.description));
        }
    }
    out
}

/// Run an interactive chat over `input` until `/quit` or end of input.
///
/// Each line is submitted on its own task so input stays responsive while an
/// answer is outstanding; lines sent in that window are turned away by the
/// session. End of input waits for outstanding answers before closing, while
/// `/quit` closes at once and drops them.
pub async fn run_chat<R>(
    manager: Arc<SessionManager>,
    input: R,
    title: &str,
    timestamp_format: &str,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    println!("{}", title);
    println!("{}", "-".repeat(title.chars().count()));
    for turn in manager.turns() {
        println!("{}", render_turn(&turn, timestamp_format));
    }

    let mut events = manager.subscribe();
    let format = timestamp_format.to_string();
    let renderer = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(SessionEvent::TurnAppended(turn)) => {
                    println!("{}", render_turn(&turn, &format));
                }
                Ok(SessionEvent::PendingChanged(true)) => println!("  ..."),
                Ok(SessionEvent::Closed) | Err(RecvError::Closed) => break,
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Renderer fell behind; some turns not printed");
                }
            }
        }
    });

    let mut in_flight = JoinSet::new();
    let mut quit = false;
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        while in_flight.try_join_next().is_some() {}

        match line.trim() {
            "/quit" | "/exit" => {
                quit = true;
                break;
            }
            "/history" => {
                for turn in manager.turns() {
                    println!("{}", render_turn(&turn, timestamp_format));
                }
                continue;
            }
            _ => {}
        }

        let manager = Arc::clone(&manager);
        in_flight.spawn(async move {
            match manager.submit(&line).await {
                SubmitOutcome::Rejected(Rejection::EmptyInput | Rejection::Closed) => {}
                SubmitOutcome::Rejected(reason) => eprintln!("({})", reason),
                _ => {}
            }
        });
    }

    if quit {
        manager.close();
        while in_flight.join_next().await.is_some() {}
    } else {
        tracing::debug!(outstanding = in_flight.len(), "End of input; waiting for answers");
        while in_flight.join_next().await.is_some() {}
        manager.close();
    }
    let _ = renderer.await;
    Ok(())
}
