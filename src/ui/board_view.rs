//! Board rendering for the Gomoku GUI

use egui::{Color32, CornerRadius, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use crate::board::{Board, Coord, Stone, BOARD_SIZE};

use super::theme::*;

/// What the board needs to draw besides the stones
pub struct BoardMarks<'a> {
    /// Side to move for the hover preview; `None` disables clicks
    pub turn: Option<Stone>,
    pub last_move: Option<Coord>,
    pub suggested_move: Option<Coord>,
    pub winning_line: &'a [Coord],
}

/// Board view handles rendering and input for the game board
pub struct BoardView {
    cell_size: f32,
    board_rect: Rect,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 36.0,
            board_rect: Rect::NOTHING,
        }
    }
}

impl BoardView {
    /// Render the board and return the clicked cell, if any
    pub fn show(&mut self, ui: &mut egui::Ui, board: &Board, marks: &BoardMarks<'_>) -> Option<Coord> {
        let available_size = ui.available_size();

        let board_px = available_size.x.min(available_size.y) - 20.0;
        self.cell_size = (board_px - 2.0 * BOARD_MARGIN) / (BOARD_SIZE as f32 - 1.0);

        let (response, painter) = ui.allocate_painter(Vec2::new(board_px, board_px), Sense::click());
        self.board_rect = response.rect;

        painter.rect_filled(self.board_rect, CornerRadius::same(4), BOARD_BG);
        self.draw_grid(&painter);
        self.draw_star_points(&painter);
        self.draw_coordinates(&painter);

        for (coord, stone) in board.occupied() {
            self.draw_stone(&painter, coord, stone);
        }

        if let Some(coord) = marks.last_move {
            painter.circle_filled(self.board_to_screen(coord), LAST_MOVE_MARKER_RADIUS, LAST_MOVE_MARKER);
        }
        if !marks.winning_line.is_empty() {
            self.draw_winning_line(&painter, marks.winning_line);
        }
        if let (Some(coord), Some(turn)) = (marks.suggested_move, marks.turn) {
            self.draw_suggestion(&painter, coord, turn);
        }

        let turn = marks.turn?;
        let hovered = response.hover_pos().and_then(|p| self.screen_to_board(p))?;
        let is_valid = board.is_empty_at(hovered);
        self.draw_hover_preview(&painter, hovered, turn, is_valid);

        (response.clicked() && is_valid).then_some(hovered)
    }

    fn draw_grid(&self, painter: &Painter) {
        let stroke = Stroke::new(GRID_LINE_WIDTH, GRID_LINE);
        let far = BOARD_MARGIN + (BOARD_SIZE as f32 - 1.0) * self.cell_size;

        for i in 0..BOARD_SIZE {
            let offset = BOARD_MARGIN + i as f32 * self.cell_size;

            let start = self.board_rect.min + Vec2::new(offset, BOARD_MARGIN);
            let end = self.board_rect.min + Vec2::new(offset, far);
            painter.line_segment([start, end], stroke);

            let start = self.board_rect.min + Vec2::new(BOARD_MARGIN, offset);
            let end = self.board_rect.min + Vec2::new(far, offset);
            painter.line_segment([start, end], stroke);
        }
    }

    fn draw_star_points(&self, painter: &Painter) {
        for (col, row) in STAR_POINTS {
            painter.circle_filled(self.board_to_screen(Coord::new(col, row)), STAR_POINT_RADIUS, STAR_POINT);
        }
    }

    /// Labels 1-15 on both axes, matching the spoken `color col row` form
    fn draw_coordinates(&self, painter: &Painter) {
        let font = egui::FontId::proportional(12.0);

        for i in 0..BOARD_SIZE {
            let label = (i + 1).to_string();
            let along = BOARD_MARGIN + i as f32 * self.cell_size;

            let top = Pos2::new(self.board_rect.min.x + along, self.board_rect.min.y + 14.0);
            painter.text(top, egui::Align2::CENTER_CENTER, &label, font.clone(), GRID_LINE);

            let left = Pos2::new(self.board_rect.min.x + 14.0, self.board_rect.min.y + along);
            painter.text(left, egui::Align2::CENTER_CENTER, &label, font.clone(), GRID_LINE);
        }
    }

    fn draw_stone(&self, painter: &Painter, coord: Coord, stone: Stone) {
        let center = self.board_to_screen(coord);
        let radius = self.cell_size * STONE_RADIUS_RATIO;
        let shadow_offset = Vec2::new(2.0, 2.0);

        match stone {
            Stone::Black => {
                painter.circle_filled(center + shadow_offset, radius, Color32::from_rgba_unmultiplied(0, 0, 0, 60));
                painter.circle_filled(center, radius, BLACK_STONE);
                let highlight_offset = Vec2::new(-radius * 0.3, -radius * 0.3);
                painter.circle_filled(center + highlight_offset, radius * 0.2, BLACK_STONE_HIGHLIGHT);
            }
            Stone::White => {
                painter.circle_filled(center + shadow_offset, radius, Color32::from_rgba_unmultiplied(0, 0, 0, 40));
                painter.circle_filled(center, radius, WHITE_STONE);
                painter.circle_stroke(center, radius * 0.85, Stroke::new(radius * 0.1, WHITE_STONE_SHADOW));
            }
        }
    }

    fn draw_winning_line(&self, painter: &Painter, line: &[Coord]) {
        let stroke = Stroke::new(4.0, WIN_HIGHLIGHT);

        for pair in line.windows(2) {
            painter.line_segment([self.board_to_screen(pair[0]), self.board_to_screen(pair[1])], stroke);
        }
        let radius = self.cell_size * STONE_RADIUS_RATIO + 3.0;
        for &coord in line {
            painter.circle_stroke(self.board_to_screen(coord), radius, stroke);
        }
    }

    fn draw_suggestion(&self, painter: &Painter, coord: Coord, turn: Stone) {
        let center = self.board_to_screen(coord);
        let radius = self.cell_size * STONE_RADIUS_RATIO;

        painter.circle_filled(center, radius, ghost_color(turn));
        painter.circle_stroke(center, radius, Stroke::new(2.0, HINT_RING));
        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            "?",
            egui::FontId::proportional(14.0),
            if turn == Stone::Black { WHITE_STONE } else { BLACK_STONE },
        );
    }

    fn draw_hover_preview(&self, painter: &Painter, coord: Coord, turn: Stone, is_valid: bool) {
        let color = if is_valid { ghost_color(turn) } else { hover_invalid() };
        painter.circle_filled(self.board_to_screen(coord), self.cell_size * STONE_RADIUS_RATIO, color);
    }

    /// Nearest intersection to a screen point
    pub fn screen_to_board(&self, screen_pos: Pos2) -> Option<Coord> {
        let relative = screen_pos - self.board_rect.min;
        let col = ((relative.x - BOARD_MARGIN + self.cell_size * 0.5) / self.cell_size).floor();
        let row = ((relative.y - BOARD_MARGIN + self.cell_size * 0.5) / self.cell_size).floor();
        Coord::checked(col as i32, row as i32)
    }

    pub fn board_to_screen(&self, coord: Coord) -> Pos2 {
        let x = self.board_rect.min.x + BOARD_MARGIN + f32::from(coord.col) * self.cell_size;
        let y = self.board_rect.min.y + BOARD_MARGIN + f32::from(coord.row) * self.cell_size;
        Pos2::new(x, y)
    }
}

fn ghost_color(turn: Stone) -> Color32 {
    match turn {
        Stone::Black => Color32::from_rgba_unmultiplied(20, 20, 20, 90),
        Stone::White => Color32::from_rgba_unmultiplied(240, 240, 240, 90),
    }
}
