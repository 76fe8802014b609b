//! Terminal facilitation loop
//!
//! Drives a single view from stdin: an empty line toggles the current
//! phase, and roster commands are accepted while still in the lobby.

use anyhow::{Context, Result};
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::session::{MeetingSession, MeetingSnapshot, RosterEdit};
use crate::timer::{format_clock, Transition};

/// A parsed console line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Toggle,
    Add(String),
    Remove(usize),
    Clear,
    Shuffle,
    Speakers,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word {
            "" => Command::Toggle,
            "add" => Command::Add(rest.to_string()),
            // Speakers are listed 1-based
            "rm" => match rest.parse::<usize>() {
                Ok(n) if n > 0 => Command::Remove(n - 1),
                _ => Command::Unknown(line.to_string()),
            },
            "clear" => Command::Clear,
            "shuffle" => Command::Shuffle,
            "ls" | "speakers" => Command::Speakers,
            "q" | "quit" => Command::Quit,
            _ => Command::Unknown(line.to_string()),
        }
    }
}

/// One-line status, e.g. "Team A  -0:12  [overtime]  meeting 14:07"
pub fn status_line(snapshot: &MeetingSnapshot) -> String {
    let mut line = format!(
        "[{}/{}] {}  {}",
        snapshot.phase_index,
        snapshot.phase_count - 1,
        snapshot.phase_name,
        snapshot.countdown
    );

    if snapshot.overtime {
        line.push_str("  [overtime]");
    } else if !snapshot.running && !snapshot.ended {
        line.push_str("  [paused]");
    }

    line.push_str(&format!("  meeting {}", snapshot.elapsed));
    if let Some(start) = &snapshot.started_at_local {
        line.push_str(&format!(" (since {})", start));
    }

    line
}

/// Run the console loop until the meeting ends or the user quits
pub async fn run(session: &MeetingSession) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut refresh = tokio::time::interval(Duration::from_secs(1));

    println!("Enter: start/stop  add <name> | rm <n> | clear | shuffle | ls  q: quit");
    print_speakers(session).await;

    loop {
        tokio::select! {
            _ = refresh.tick() => {
                let snapshot = session.snapshot().await;
                print!("\r{}\x1b[K", status_line(&snapshot));
                std::io::stdout().flush().ok();
            }
            line = lines.next_line() => {
                let line = line.context("Failed to read from stdin")?;
                let Some(line) = line else {
                    break;
                };

                if !handle(session, Command::parse(&line)).await {
                    break;
                }

                if session.snapshot().await.ended {
                    break;
                }
            }
        }
    }

    print_summary(&session.snapshot().await);
    session.shutdown();

    Ok(())
}

/// Apply a command; returns false when the loop should stop
async fn handle(session: &MeetingSession, command: Command) -> bool {
    let outcome = match command {
        Command::Toggle => {
            match session.toggle().await {
                Transition::Stopped { record: Some(record), .. }
                | Transition::Ended { record: Some(record) } => {
                    println!(
                        "\n{} done in {}",
                        record.name,
                        format_clock(record.actual_duration_secs)
                    );
                }
                _ => {}
            }
            return true;
        }
        Command::Add(name) => session.add_speaker(&name).await,
        Command::Remove(index) => session.remove_speaker(index).await,
        Command::Clear => session.clear_speakers().await,
        Command::Shuffle => session.shuffle_speakers().await,
        Command::Speakers => {
            print_speakers(session).await;
            return true;
        }
        Command::Quit => return false,
        Command::Unknown(line) => {
            println!("\nUnknown command: {}", line);
            return true;
        }
    };

    match outcome {
        RosterEdit::Applied => print_speakers(session).await,
        RosterEdit::Ignored => {}
        RosterEdit::Locked => println!("\nSpeakers can only be changed before the meeting starts"),
        RosterEdit::NotFound => println!("\nNo such speaker"),
    }

    true
}

async fn print_speakers(session: &MeetingSession) {
    let Some(roster) = session.roster().await else {
        return;
    };

    println!();
    for (i, speaker) in roster.speakers.iter().enumerate() {
        println!("  {:>2}. {}", i + 1, speaker.name);
    }
    for pinned in &roster.pinned {
        println!("      {}", pinned.name);
    }
    println!(
        "  {} each, {}s buffer",
        format_clock(f64::from(roster.per_speaker_secs)),
        roster.buffer_secs
    );
}

fn print_summary(snapshot: &MeetingSnapshot) {
    println!();
    info!(
        "Meeting {} finished: {} phases in {}",
        snapshot.meeting_id,
        snapshot.completed.len(),
        snapshot.elapsed
    );

    for phase in &snapshot.completed {
        println!(
            "  {:<24} {}",
            phase.name,
            format_clock(phase.actual_duration_secs)
        );
    }
    println!("  {:<24} {}", "Meeting", snapshot.elapsed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse(""), Command::Toggle);
        assert_eq!(Command::parse("   "), Command::Toggle);
        assert_eq!(Command::parse("add  Ada Lovelace "), Command::Add("Ada Lovelace".to_string()));
        assert_eq!(Command::parse("rm 2"), Command::Remove(1));
        assert_eq!(Command::parse("rm 0"), Command::Unknown("rm 0".to_string()));
        assert_eq!(Command::parse("shuffle"), Command::Shuffle);
        assert_eq!(Command::parse("q"), Command::Quit);
    }
}
