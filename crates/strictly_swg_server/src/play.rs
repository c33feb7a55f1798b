//! Play a game in the terminal.

use anyhow::Result;
use std::io::{BufRead, Write};
use strictly_swg::{FinalMessages, Move, MoveSource, Session, SessionError};
use tracing::{debug, info, instrument};

/// What the player typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play(Move),
    Reset,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, SessionError> {
    match line.trim().to_ascii_lowercase().as_str() {
        "r" | "reset" => Ok(Command::Reset),
        "q" | "quit" | "exit" => Ok(Command::Quit),
        other => other.parse().map(Command::Play),
    }
}

fn prompt<S: MoveSource>(session: &Session<S>, out: &mut impl Write) -> Result<()> {
    let state = session.state();
    if session.is_terminated() {
        write!(out, "Game over. [r]eset or [q]uit > ")?;
    } else {
        write!(
            out,
            "Round {}/{} - [s]nake, [w]ater, [g]un, [r]eset, [q]uit > ",
            state.current_round(),
            state.max_rounds()
        )?;
    }
    out.flush()?;
    Ok(())
}

/// Runs an interactive game until the player quits or input ends.
#[instrument(skip_all)]
pub fn run<S, R, W>(
    session: &mut Session<S>,
    messages: &FinalMessages,
    input: R,
    mut out: W,
) -> Result<()>
where
    S: MoveSource,
    R: BufRead,
    W: Write,
{
    info!("Starting terminal game");
    writeln!(out, "🐍 Snake - Water - Gun")?;
    prompt(session, &mut out)?;

    for line in input.lines() {
        let line = line?;
        debug!(input = %line, "Read command");

        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Reset) => {
                session.reset();
                writeln!(out, "New game!")?;
            }
            Ok(Command::Play(user_move)) => match session.submit_move(user_move) {
                Ok(result) => {
                    writeln!(
                        out,
                        "You: {}  Computer: {}  {}",
                        result.user_move(),
                        result.computer_move(),
                        messages.for_outcome(*result.outcome())
                    )?;
                    writeln!(
                        out,
                        "Score: You {} - {} Computer",
                        result.user_score(),
                        result.computer_score()
                    )?;
                    if let Some(standing) = result.standing() {
                        writeln!(out, "🎯 Game Over! {}", messages.for_standing(*standing))?;
                    }
                }
                Err(e) => writeln!(out, "{}", e)?,
            },
            Err(e) => writeln!(out, "{}", e)?,
        }

        prompt(session, &mut out)?;
    }

    writeln!(out)?;
    info!(
        rounds_played = session.state().rounds_played(),
        "Terminal game finished"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::num::NonZeroU32;
    use strictly_swg::FixedMove;

    fn play_script(script: &str, max_rounds: u32) -> String {
        let mut session = Session::new(
            NonZeroU32::new(max_rounds).unwrap(),
            FixedMove(Move::Water),
        );
        let mut out = Vec::new();
        run(
            &mut session,
            &FinalMessages::default(),
            Cursor::new(script),
            &mut out,
        )
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("S"), Ok(Command::Play(Move::Snake)));
        assert_eq!(parse_command(" reset "), Ok(Command::Reset));
        assert_eq!(parse_command("q"), Ok(Command::Quit));
        assert!(parse_command("rock").is_err());
    }

    #[test]
    fn test_full_game() {
        let output = play_script("s\ns\n", 2);
        assert!(output.contains("Score: You 2 - 0 Computer"));
        assert!(output.contains("🎯 Game Over! 🎉 You won the game!"));
        assert!(output.contains("Game over. [r]eset or [q]uit"));
    }

    #[test]
    fn test_move_after_game_over_is_refused() {
        let output = play_script("g\ng\nq\n", 1);
        assert!(output.contains("Game over after 1 rounds"));
    }

    #[test]
    fn test_invalid_input_and_reset() {
        let output = play_script("rock\nw\nr\n", 3);
        assert!(output.contains("Invalid move: \"rock\""));
        assert!(output.contains("It's a draw!"));
        assert!(output.contains("New game!"));
        assert!(output.ends_with("Round 1/3 - [s]nake, [w]ater, [g]un, [r]eset, [q]uit > \n"));
    }
}
