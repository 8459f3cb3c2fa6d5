//! Line-oriented console host
//!
//! Reads the one-line text form of moves and control commands and prints
//! the board after every change. When an AI color is configured it
//! answers each human move on its own.

use std::fmt::Write as _;
use std::io::{self, BufRead, Write};

use crate::game::{Command, ControlResponse, GameConfig, GameController, GameError, MoveOutcome};

const HELP: &str = "\
commands:
  <black|white> <col> <row>   place a stone, 1-indexed (e.g. `black 8 8`)
  ai                          let the AI play the side to move
  hint                        suggest a move for the side to move
  undo | undo1                take back two moves / one move
  resign                      the side to move gives up
  restart                     clear the board
  board | history             show the board / the move list
  terminate                   leave";

pub struct Console {
    game: GameController,
    quit: bool,
}

impl Console {
    pub fn new(config: GameConfig) -> Self {
        Self {
            game: GameController::new(config),
            quit: false,
        }
    }

    #[inline]
    pub fn game(&self) -> &GameController {
        &self.game
    }

    #[inline]
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Run one parsed command and return what to print.
    pub fn execute(&mut self, command: Command) -> String {
        match command {
            Command::Move(mv) => match self.game.apply_command(&mv) {
                Ok(outcome) => {
                    let mut out = describe(&outcome);
                    if !outcome.is_game_over() && self.game.is_ai_turn() {
                        let _ = write!(out, "\n{}", ai_line(self.ai_turn()));
                    }
                    let _ = write!(out, "\n{}", self.game.board());
                    out
                }
                Err(e) => format!("error: {e}"),
            },
            Command::Ai => match self.ai_turn() {
                Ok(outcome) => format!("{}\n{}", ai_line(Ok(outcome)), self.game.board()),
                Err(e) => ai_line(Err(e)),
            },
            Command::Hint => match self.game.recommend_move() {
                Ok(hint) => format!("hint: {hint}"),
                Err(e) => format!("error: {e}"),
            },
            Command::Board => self.game.board().to_string(),
            Command::History => {
                let log = self.game.move_log();
                if log.is_empty() {
                    return "no moves yet".to_string();
                }
                log.iter()
                    .map(|m| format!("{:>3}. {} {}", m.number, m.color, m.coord))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            Command::Help => HELP.to_string(),
            Command::Control(control) => match self.game.handle_control(control) {
                Ok(ControlResponse::Reset) => format!("new game\n{}", self.game.board()),
                Ok(ControlResponse::Undone { count }) => {
                    format!("took back {count} move(s)\n{}", self.game.board())
                }
                Ok(ControlResponse::Resigned(result)) => result.to_string(),
                Ok(ControlResponse::Terminate) => {
                    self.quit = true;
                    "bye".to_string()
                }
                Err(e) => format!("error: {e}"),
            },
        }
    }

    fn ai_turn(&mut self) -> Result<MoveOutcome, GameError> {
        // Let `ai` drive either side in a two-player game
        match self.game.ai_color() {
            Some(_) => self.game.request_ai_move().map(|ai| ai.outcome),
            None => self.play_hint(),
        }
    }

    fn play_hint(&mut self) -> Result<MoveOutcome, GameError> {
        let hint = self.game.recommend_move()?;
        self.game.submit_move(hint.coord(), hint.color)
    }

    /// Read commands until `terminate` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        writeln!(output, "{}", self.game.board())?;
        writeln!(output, "type `help` for commands")?;
        output.flush()?;

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let response = match line.parse::<Command>() {
                Ok(command) => self.execute(command),
                Err(e) => {
                    log::warn!("unparsed input {:?}: {e}", line.trim());
                    format!("error: {e}")
                }
            };
            writeln!(output, "{response}")?;
            output.flush()?;

            if self.quit {
                break;
            }
        }
        Ok(())
    }
}

/// One line for the AI's turn, whether it played or failed.
fn ai_line(result: Result<MoveOutcome, GameError>) -> String {
    match result {
        Ok(outcome) => format!("AI: {}", describe(&outcome)),
        Err(e) => format!("error: {e}"),
    }
}

fn describe(outcome: &MoveOutcome) -> String {
    let (col, row) = outcome.coord.one_based();
    let mut out = format!("{} {} {}", outcome.color, col, row);
    if let Some(result) = &outcome.result {
        let _ = write!(out, "\n{result}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Stone;

    fn run_script(config: GameConfig, script: &str) -> (Console, String) {
        let mut console = Console::new(config);
        let mut output = Vec::new();
        console.run(script.as_bytes(), &mut output).unwrap();
        (console, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_two_player_script() {
        let (console, out) = run_script(GameConfig::two_player(), "black 8 8\nwhite 9,8\nhistory\n");
        assert_eq!(console.game().board().len(), 2);
        assert!(out.contains("  1. black (8,8)"));
        assert!(out.contains("  2. white (9,8)"));
    }

    #[test]
    fn test_ai_answers_human_move() {
        let (console, out) = run_script(GameConfig::default(), "black 8 8\n");
        assert_eq!(console.game().board().len(), 2);
        assert!(out.contains("AI: white"));
    }

    #[test]
    fn test_errors_do_not_stop_the_loop() {
        let (console, out) =
            run_script(GameConfig::two_player(), "fly 1 2\nwhite 8 8\nblack 0 4\nblack 8 8\n");
        assert!(out.contains("unknown command 'fly'"));
        assert!(out.contains("it is black's turn, not white's"));
        assert!(out.contains("outside the board"));
        assert_eq!(console.game().board().len(), 1);
    }

    #[test]
    fn test_terminate_stops_reading() {
        let (console, out) = run_script(GameConfig::two_player(), "black 8 8\nterminate\nwhite 9 9\n");
        assert!(console.should_quit());
        assert!(out.contains("bye"));
        assert_eq!(console.game().board().len(), 1);
    }

    #[test]
    fn test_ai_failure_gets_its_own_line() {
        let mut console = Console::new(GameConfig::two_player());
        console.execute("black 8 8".parse().unwrap());
        console.execute("resign".parse().unwrap());

        let out = console.execute(Command::Ai);
        assert_eq!(out, "error: the game is over, restart to play again");

        let line = format!("black 8 8\n{}", ai_line(Err(GameError::NotAiTurn)));
        assert_eq!(line.lines().nth(1), Some("error: it is not the AI's turn"));
    }

    #[test]
    fn test_ai_command_in_two_player_game() {
        let mut console = Console::new(GameConfig::two_player());
        let out = console.execute(Command::Ai);
        assert!(out.contains("AI: black 8 8"));
        assert_eq!(console.game().board().get(crate::board::Coord::center()), Some(Stone::Black));
    }
}
