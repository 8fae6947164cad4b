// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Hosts a [`MindMapEditor`] in a ratatui + crossterm session: it reports the container size,
//! drives animation ticks, paints frames and translates keys and mouse gestures into editor
//! commands.

use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as Axis, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use tracing::{info, warn};

use crate::editor::MindMapEditor;
use crate::interaction::Direction;
use crate::model::{MindMapNode, NodeId, Point};
use crate::ops::ApplyResult;
use crate::render::{CanvasError, NodeBox, Painted, Rgb};
use crate::store::MindMapFile;

const FOCUS_COLOR: Color = Color::LightGreen;
const EDIT_COLOR: Color = Color::Yellow;
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const TOAST_DURATION: Duration = Duration::from_secs(2);
const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const IDLE_POLL: Duration = Duration::from_millis(250);
const PAN_STEP_CELLS: f64 = 4.0;

/// Colors cycled by the `c` key. After the last one the color is cleared.
const NODE_PALETTE: [&str; 5] = ["#e06c75", "#98c379", "#61afef", "#e5c07b", "#c678dd"];

/// Runs the interactive terminal UI until the user quits.
///
/// `file` is where `s` saves to; without one (the demo) saving only shows a toast.
pub fn run(editor: MindMapEditor, file: Option<MindMapFile>) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(editor, file);
    let mut last_tick = Instant::now();
    info!("terminal session started");

    while !app.should_quit {
        terminal.draw(|frame| draw(frame, &mut app))?;

        let timeout = if app.editor.is_animating() { FRAME_INTERVAL } else { IDLE_POLL };
        let ready = event::poll(timeout)?;

        // Advance running animations by the time waited, before the event can start new ones.
        let now = Instant::now();
        app.editor.tick(now.duration_since(last_tick));
        last_tick = now;

        if ready {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }
    }

    info!("terminal session closed");
    Ok(())
}

/// Paints one frame of `editor` on a `cols` x `rows` grid and returns it as plain text.
pub fn print_frame(editor: &mut MindMapEditor, cols: u16, rows: u16) -> Result<String, CanvasError> {
    let paint = editor.config().paint;
    editor.set_container_size(f64::from(cols) * paint.cell_width, f64::from(rows) * paint.cell_height);
    let painted = editor.paint(usize::from(cols), usize::from(rows))?;
    Ok(painted.canvas.to_string_trimmed())
}

/// The mind map shown by `--demo`.
pub fn demo_tree() -> MindMapNode {
    fn leaf(name: &str) -> MindMapNode {
        MindMapNode::new(name)
    }

    MindMapNode::new("Nereid").with_children([
        MindMapNode::new("Model")
            .with_color("#61afef")
            .with_children([leaf("Node ids"), leaf("Arena tree"), leaf("Ops batches")]),
        MindMapNode::new("Layout")
            .with_color("#98c379")
            .with_children([leaf("Tidy tree"), leaf("Contours")]),
        MindMapNode::new("Viewport").with_color("#e5c07b").with_children([
            leaf("Zoom"),
            leaf("Pan"),
            MindMapNode::new("Fit").with_children([leaf("Animated"), leaf("Immediate")]),
        ]),
        MindMapNode::new("Render")
            .with_color("#c678dd")
            .with_children([leaf("Enter"), leaf("Update"), leaf("Exit")]),
        MindMapNode::new("Docs").with_link("https://github.com/bnomei/nereid"),
    ])
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

struct App {
    editor: MindMapEditor,
    file: Option<MindMapFile>,
    toast: Option<Toast>,
    should_quit: bool,
    map_area: Rect,
    last_painted: Option<Painted>,
}

impl App {
    fn new(editor: MindMapEditor, file: Option<MindMapFile>) -> Self {
        Self {
            editor,
            file,
            toast: None,
            should_quit: false,
            map_area: Rect::default(),
            last_painted: None,
        }
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast { message: message.into(), expires_at: Instant::now() + TOAST_DURATION });
    }

    fn toast_message(&mut self) -> Option<String> {
        match &self.toast {
            Some(toast) if toast.expires_at > Instant::now() => Some(toast.message.clone()),
            Some(_) => {
                self.toast = None;
                None
            }
            None => None,
        }
    }

    /// Reports the map area to the editor and paints it. Keeps the hit index for mouse input.
    fn refresh(&mut self, area: Rect) -> Vec<Line<'static>> {
        self.map_area = area;
        let paint = self.editor.config().paint;
        self.editor
            .set_container_size(f64::from(area.width) * paint.cell_width, f64::from(area.height) * paint.cell_height);

        match self.editor.paint(usize::from(area.width), usize::from(area.height)) {
            Ok(painted) => {
                let editing = self.editor.editing().map(|edit| edit.node_id());
                let selection = self.editor.selection();
                let lines = canvas_lines(&painted, |id| box_highlight(selection.contains(id), editing == Some(id)));
                self.last_painted = Some(painted);
                lines
            }
            Err(err) => {
                warn!(%err, "paint failed");
                self.last_painted = None;
                Vec::new()
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.editor.editing().is_some() {
            self.handle_edit_key(key);
            return;
        }

        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.should_quit = true,
            KeyCode::Esc => self.editor.clear_selection(),

            KeyCode::Left if shift => self.navigate(Direction::Parent),
            KeyCode::Right if shift => self.navigate(Direction::FirstChild),
            KeyCode::Up if shift => self.navigate(Direction::PrevSibling),
            KeyCode::Down if shift => self.navigate(Direction::NextSibling),
            KeyCode::Char('h') => self.navigate(Direction::Parent),
            KeyCode::Char('l') => self.navigate(Direction::FirstChild),
            KeyCode::Char('k') => self.navigate(Direction::PrevSibling),
            KeyCode::Char('j') => self.navigate(Direction::NextSibling),

            KeyCode::Left => self.pan_cells(PAN_STEP_CELLS, 0.0),
            KeyCode::Right => self.pan_cells(-PAN_STEP_CELLS, 0.0),
            KeyCode::Up => self.pan_cells(0.0, PAN_STEP_CELLS / 2.0),
            KeyCode::Down => self.pan_cells(0.0, -PAN_STEP_CELLS / 2.0),

            KeyCode::Char('+') | KeyCode::Char('=') => self.editor.zoom_in(),
            KeyCode::Char('-') => self.editor.zoom_out(),
            KeyCode::Char('0') => self.editor.reset_view(),

            KeyCode::Char(' ') => {
                if let Some(id) = self.primary("fold") {
                    let result = self.editor.toggle_collapse(id);
                    self.report(&result, "nothing to fold");
                }
            }
            KeyCode::Tab => {
                if let Some(id) = self.primary("add a child") {
                    let result = self.editor.add_child(id);
                    self.select_added(&result);
                }
            }
            KeyCode::Enter => {
                if let Some(id) = self.primary("add a sibling") {
                    let result = self.editor.add_sibling(id);
                    self.report(&result, "the root has no siblings");
                    self.select_added(&result);
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.primary("detach") {
                    let result = self.editor.detach_node(id);
                    self.report(&result, "only grandchildren can be detached");
                }
            }
            KeyCode::Char('x') | KeyCode::Delete => self.delete_selection(),
            KeyCode::Char('e') | KeyCode::F(2) => {
                if let Some(id) = self.primary("edit") {
                    self.editor.edit_node(id);
                }
            }
            KeyCode::Char('c') => self.cycle_color(),
            KeyCode::Char('s') => self.save(),
            _ => {}
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.editor.cancel_edit(),
            KeyCode::Enter => {
                self.editor.commit_edit();
            }
            KeyCode::Backspace => {
                if let Some(edit) = self.editor.editing_mut() {
                    edit.backspace();
                }
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(edit) = self.editor.editing_mut() {
                    edit.push(ch);
                }
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let Some(at) = self.screen_point(mouse.column, mouse.row) else {
            return;
        };
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.editor.pointer_down(at),
            MouseEventKind::Drag(MouseButton::Left) => self.editor.pointer_move(at),
            MouseEventKind::Up(MouseButton::Left) => {
                self.editor.pointer_up();
                let target = self.last_painted.as_ref().and_then(|painted| self.editor.hit_test(painted, at));
                let additive = mouse.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::SHIFT);
                self.editor.click(target, additive);
            }
            MouseEventKind::ScrollUp => self.editor.wheel(1, at),
            MouseEventKind::ScrollDown => self.editor.wheel(-1, at),
            _ => {}
        }
    }

    /// Center of a terminal cell in editor screen space, or `None` outside the map area.
    fn screen_point(&self, column: u16, row: u16) -> Option<Point> {
        let area = self.map_area;
        let inside = column >= area.x
            && column < area.x.saturating_add(area.width)
            && row >= area.y
            && row < area.y.saturating_add(area.height);
        inside.then(|| self.editor.config().paint.screen_of(column - area.x, row - area.y))
    }

    fn primary(&mut self, action: &str) -> Option<NodeId> {
        let primary = self.editor.selection().primary();
        if primary.is_none() {
            self.set_toast(format!("select a node to {action}"));
        }
        primary
    }

    fn navigate(&mut self, direction: Direction) {
        self.editor.navigate(direction);
    }

    fn pan_cells(&mut self, cols: f64, rows: f64) {
        let paint = self.editor.config().paint;
        self.editor.pan_by(cols * paint.cell_width, rows * paint.cell_height);
    }

    fn report(&mut self, result: &ApplyResult, noop_message: &str) {
        if result.applied == 0 {
            self.set_toast(noop_message.to_owned());
        }
    }

    fn select_added(&mut self, result: &ApplyResult) {
        if let Some(&added) = result.delta.added.first() {
            self.editor.select_node(added, false);
        }
    }

    fn delete_selection(&mut self) {
        let ids = self.editor.selection().ids().to_vec();
        if ids.is_empty() {
            self.set_toast("select a node to delete");
            return;
        }
        let result = self.editor.delete_nodes(&ids);
        self.report(&result, "the root cannot be deleted");
    }

    fn cycle_color(&mut self) {
        let Some(primary) = self.primary("recolor") else {
            return;
        };
        let current = self.editor.tree().node(primary).and_then(|node| node.color());
        let next = match current.and_then(|color| NODE_PALETTE.iter().position(|c| *c == color)) {
            Some(idx) => NODE_PALETTE.get(idx + 1).copied(),
            None if current.is_some() => None,
            None => NODE_PALETTE.first().copied(),
        };
        let ids = self.editor.selection().ids().to_vec();
        self.editor.change_colors(ids.into_iter().map(|id| (id, next.map(str::to_owned))));
    }

    fn save(&mut self) {
        let Some(file) = self.file.clone() else {
            self.set_toast("no file to save to (demo session)");
            return;
        };
        match file.save(&self.editor.to_node()) {
            Ok(()) => self.set_toast(format!("saved {}", file.path().display())),
            Err(err) => {
                warn!(%err, "save failed");
                self.set_toast(format!("save failed: {err}"));
            }
        }
    }

    fn footer_line(&mut self) -> Line<'static> {
        let toast = self.toast_message();
        let mut spans = Vec::new();
        if let Some(edit) = self.editor.editing() {
            spans.push(Span::styled(
                "Rename: ".to_owned(),
                Style::default().fg(EDIT_COLOR).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(format!("{}   ", edit.draft())));
            push_footer_entry(&mut spans, "Commit", "Enter");
            push_footer_entry(&mut spans, "Cancel", "Esc");
        } else {
            for (label, keys) in [
                ("Select", "hjkl"),
                ("Pan", "arrows"),
                ("Zoom", "+/-"),
                ("Fit", "0"),
                ("Fold", "space"),
                ("Add", "tab/enter"),
                ("Edit", "e"),
                ("Color", "c"),
                ("Detach", "d"),
                ("Delete", "x"),
                ("Save", "s"),
                ("Quit", "q"),
            ] {
                push_footer_entry(&mut spans, label, keys);
            }
        }
        if let Some(message) = toast {
            spans.push(Span::styled(" | ".to_owned(), Style::default().fg(FOOTER_LABEL_COLOR)));
            spans.push(Span::raw(message));
        }
        Line::from(spans)
    }
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let layout = Layout::default()
        .direction(Axis::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.size());
    let map_area = layout[0];
    let status_area = layout[1];

    let lines = app.refresh(map_area);
    frame.render_widget(Paragraph::new(lines), map_area);
    frame.render_widget(Paragraph::new(app.footer_line()), status_area);
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, keys: &str) {
    if !spans.is_empty() {
        spans.push(Span::styled(" | ".to_owned(), Style::default().fg(FOOTER_LABEL_COLOR)));
    }
    spans.push(Span::styled(format!("{label}:"), Style::default().fg(FOOTER_LABEL_COLOR)));
    spans.push(Span::styled(
        keys.to_owned(),
        Style::default().fg(FOOTER_KEY_COLOR).add_modifier(Modifier::BOLD),
    ));
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Highlight {
    None,
    Selected,
    Editing,
}

fn box_highlight(selected: bool, editing: bool) -> Highlight {
    match (editing, selected) {
        (true, _) => Highlight::Editing,
        (false, true) => Highlight::Selected,
        (false, false) => Highlight::None,
    }
}

fn box_style(node_box: &NodeBox, highlight: Highlight) -> Style {
    let mut style = match node_box.color {
        Some(Rgb { r, g, b }) => Style::default().fg(Color::Rgb(r, g, b)),
        None => Style::default(),
    };
    match highlight {
        Highlight::Selected => style = style.fg(FOCUS_COLOR).add_modifier(Modifier::BOLD),
        Highlight::Editing => style = style.fg(EDIT_COLOR).add_modifier(Modifier::BOLD),
        Highlight::None => {}
    }
    if node_box.opacity < 1.0 {
        style = style.add_modifier(Modifier::DIM);
    }
    style
}

/// Turns a painted canvas into styled lines. Boxes later in the hit index paint over earlier
/// ones, matching the canvas.
fn canvas_lines(painted: &Painted, highlight: impl Fn(NodeId) -> Highlight) -> Vec<Line<'static>> {
    let width = painted.canvas.width();
    let height = painted.canvas.height();
    let mut styles = vec![Style::default(); width * height];

    for node_box in painted.hits.boxes() {
        let style = box_style(node_box, highlight(node_box.id));
        let rect = node_box.rect;
        for y in rect.y0.max(0)..=rect.y1.min(height as i64 - 1) {
            for x in rect.x0.max(0)..=rect.x1.min(width as i64 - 1) {
                styles[y as usize * width + x as usize] = style;
            }
        }
    }

    (0..height)
        .map(|y| {
            let mut spans = Vec::new();
            let mut run = String::new();
            let mut run_style = Style::default();
            for x in 0..width {
                let style = styles[y * width + x];
                if style != run_style && !run.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut run), run_style));
                }
                run_style = style;
                run.push(painted.canvas.get(x, y).unwrap_or(' '));
            }
            if !run.is_empty() {
                spans.push(Span::styled(run, run_style));
            }
            Line::from(spans)
        })
        .collect()
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen);
}
