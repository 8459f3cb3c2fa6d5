//! Main application for the Gomoku GUI

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, ScrollArea, SidePanel, TopBottomPanel, Vec2};

use crate::board::Stone;
use crate::game::{GameConfig, GameResult, Phase, WinType};

use super::board_view::{BoardMarks, BoardView};
use super::game_state::{GameMode, GameState};
use super::theme::*;

/// Main Gomoku application
pub struct GomokuApp {
    state: GameState,
    board_view: BoardView,
    show_debug: bool,
}

impl GomokuApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: GameConfig) -> Self {
        Self {
            state: GameState::new(config),
            board_view: BoardView::default(),
            show_debug: true,
        }
    }

    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New Game (vs AI, play Black)").clicked() {
                        self.state.switch_mode(GameMode::PvE { human_color: Stone::Black });
                        ui.close_menu();
                    }
                    if ui.button("New Game (vs AI, play White)").clicked() {
                        self.state.switch_mode(GameMode::PvE { human_color: Stone::White });
                        ui.close_menu();
                    }
                    if ui.button("New Game (two players)").clicked() {
                        self.state.switch_mode(GameMode::PvP);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        self.state.quit();
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_debug, "AI panel (D)");
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mode_text = match self.state.mode {
                        GameMode::PvE { human_color } => format!("vs AI - you play {human_color}"),
                        GameMode::PvP => "Two players".to_string(),
                    };
                    ui.label(mode_text);
                });
            });
        });
    }

    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(240.0)
            .max_width(280.0)
            .frame(Frame::new().fill(PANEL_BG))
            .show(ctx, |ui| {
                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    ui.add_space(8.0);
                    ui.label(RichText::new("GOMOKU").size(22.0).strong().color(TEXT_PRIMARY));
                    ui.label(RichText::new("15 x 15").size(11.0).color(TEXT_MUTED));
                });
                ui.add_space(12.0);

                self.render_turn_card(ui);
                ui.add_space(10.0);
                self.render_timer_card(ui);
                ui.add_space(10.0);
                self.render_actions_card(ui);
                ui.add_space(10.0);
                self.render_move_log_card(ui);

                if self.show_debug {
                    ui.add_space(10.0);
                    self.render_debug_card(ui);
                }

                if let Some(result) = self.state.game.result().cloned() {
                    ui.add_space(10.0);
                    self.render_game_over_card(ui, &result);
                }

                if let Some(msg) = &self.state.message {
                    ui.add_space(10.0);
                    Self::render_message_card(ui, msg);
                }
            });
    }

    fn card_frame() -> Frame {
        Frame::new()
            .fill(CARD_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn render_turn_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            let Some(turn) = self.state.current_turn() else {
                ui.label(RichText::new("Game over").size(18.0).strong().color(WIN_HIGHLIGHT));
                return;
            };
            let (fill, ink) = match turn {
                Stone::Black => (BLACK_STONE, TEXT_PRIMARY),
                Stone::White => (WHITE_STONE, BLACK_STONE),
            };

            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(Vec2::new(48.0, 48.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 22.0, fill);
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    self.state.game.board().len() + 1,
                    egui::FontId::proportional(16.0),
                    ink,
                );
                ui.add_space(12.0);

                ui.vertical(|ui| {
                    ui.add_space(4.0);
                    ui.label(RichText::new(turn.name().to_uppercase()).size(18.0).strong().color(TEXT_PRIMARY));
                    let status = if self.state.is_ai_thinking() {
                        ("AI thinking...", TIMER_WARNING)
                    } else if self.state.is_human_turn() {
                        ("Your turn", TIMER_NORMAL)
                    } else {
                        ("Waiting for AI", TEXT_SECONDARY)
                    };
                    ui.label(RichText::new(status.0).size(12.0).color(status.1));
                });
            });
        });
    }

    fn render_timer_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("TIMER").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            if let Some(elapsed) = self.state.ai_thinking_elapsed() {
                let secs = elapsed.as_secs_f32();
                let color = if secs < 0.5 {
                    TIMER_NORMAL
                } else if secs < 2.0 {
                    TIMER_WARNING
                } else {
                    TIMER_CRITICAL
                };
                ui.label(RichText::new(format!("{secs:.2}s")).size(28.0).strong().color(color));
            } else {
                let elapsed = self.state.move_timer.elapsed();
                ui.label(RichText::new(format!("{:.1}s", elapsed.as_secs_f32())).size(24.0).color(TEXT_PRIMARY));
            }

            if let Some(ai_time) = self.state.move_timer.ai_thinking_time {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("Last AI: {:.3}s", ai_time.as_secs_f32()))
                        .size(10.0)
                        .color(TEXT_SECONDARY),
                );
            }
        });
    }

    fn action_button(ui: &mut egui::Ui, label: &str) -> bool {
        Frame::new()
            .fill(BUTTON_BG)
            .corner_radius(CornerRadius::same(6))
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.add(egui::Label::new(RichText::new(label).size(12.0).color(TEXT_PRIMARY)).sense(egui::Sense::click()))
                    .clicked()
            })
            .inner
    }

    fn render_actions_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("ACTIONS").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                if Self::action_button(ui, "Restart") {
                    self.state.reset();
                }
                if Self::action_button(ui, "Undo") {
                    self.state.undo();
                }
                if Self::action_button(ui, "Undo one") {
                    self.state.undo_one();
                }
            });
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if Self::action_button(ui, "Resign") {
                    self.state.resign();
                }
                if Self::action_button(ui, "Hint") {
                    self.state.request_suggestion();
                }
                if Self::action_button(ui, "Quit") {
                    self.state.quit();
                }
            });
        });
    }

    fn render_move_log_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("MOVES").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            let log = self.state.game.move_log();
            if log.is_empty() {
                ui.label(RichText::new("No moves yet").size(11.0).color(TEXT_SECONDARY));
                return;
            }
            ScrollArea::vertical().max_height(140.0).stick_to_bottom(true).show(ui, |ui| {
                for entry in &log {
                    ui.label(
                        RichText::new(format!("{:>3}. {} {}", entry.number, entry.color, entry.coord))
                            .size(11.0)
                            .monospace()
                            .color(TEXT_SECONDARY),
                    );
                }
            });
        });
    }

    fn render_debug_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("AI SEARCH").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            let Some(result) = self.state.game.last_search() else {
                ui.label(RichText::new("Waiting for AI...").size(10.0).color(TEXT_MUTED));
                return;
            };
            ui.label(RichText::new(format!("Depth {}  Score {}", result.depth, result.score)).size(11.0).color(TIMER_NORMAL));
            ui.label(
                RichText::new(format!(
                    "{} nodes, {} leaves, {} cutoffs",
                    result.stats.nodes, result.stats.leaves, result.stats.cutoffs
                ))
                .size(10.0)
                .color(TEXT_SECONDARY),
            );
            ui.label(RichText::new(format!("{} ms", result.elapsed.as_millis())).size(10.0).color(TEXT_SECONDARY));
            if result.aborted {
                ui.label(RichText::new("stopped early").size(10.0).color(TIMER_WARNING));
            }
            if let Some(coord) = result.best_move {
                ui.label(RichText::new(format!("-> {coord}")).size(12.0).strong().color(WIN_HIGHLIGHT));
            }
        });
    }

    fn render_game_over_card(&mut self, ui: &mut egui::Ui, result: &GameResult) {
        let headline = match result.winner {
            Some(winner) => format!("{} WINS!", winner.name().to_uppercase()),
            None => "DRAW".to_string(),
        };
        let detail = match result.win_type {
            WinType::FiveInRow => "by five in a row",
            WinType::Resignation => "by resignation",
            WinType::BoardFull => "the board is full",
        };

        Frame::new()
            .fill(egui::Color32::from_rgb(45, 80, 55))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("GAME OVER").size(12.0).color(egui::Color32::from_rgb(180, 255, 180)));
                    ui.add_space(8.0);
                    ui.label(RichText::new(headline).size(18.0).strong().color(TEXT_PRIMARY));
                    ui.label(RichText::new(detail).size(11.0).color(TEXT_SECONDARY));
                    ui.add_space(12.0);
                    if Self::action_button(ui, "New Game") {
                        self.state.reset();
                    }
                });
            });
    }

    fn render_message_card(ui: &mut egui::Ui, msg: &str) {
        Frame::new()
            .fill(egui::Color32::from_rgb(80, 60, 30))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
            });
    }

    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            let accepting = self.state.is_human_turn() && !self.state.is_ai_thinking();
            let winning_line = self
                .state
                .game
                .result()
                .map(|r| r.winning_line.clone())
                .unwrap_or_default();
            let marks = BoardMarks {
                turn: if accepting { self.state.current_turn() } else { None },
                last_move: self.state.game.board().last_move(),
                suggested_move: self.state.suggested_move,
                winning_line: &winning_line,
            };

            let clicked = self.board_view.show(ui, self.state.game.board(), &marks);
            if let Some(coord) = clicked {
                if let Err(msg) = self.state.try_place_stone(coord) {
                    self.state.message = Some(msg);
                }
            }
        });
    }

    fn handle_input(&mut self, ctx: &Context) {
        ctx.input(|i| {
            if i.key_pressed(egui::Key::D) {
                self.show_debug = !self.show_debug;
            }
            if i.key_pressed(egui::Key::H) {
                self.state.request_suggestion();
            }
            if i.key_pressed(egui::Key::U) {
                self.state.undo();
            }
            if i.key_pressed(egui::Key::N) {
                self.state.reset();
            }
        });
    }
}

impl eframe::App for GomokuApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);
        self.state.check_ai_result();

        if self.state.game.phase() != Phase::Terminal && self.state.game.is_ai_turn() {
            self.state.start_ai_thinking();
        }

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);

        if self.state.quit_requested {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
        // The move timer ticks, so keep repainting while a game runs
        if self.state.is_ai_thinking() || self.state.current_turn().is_some() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
