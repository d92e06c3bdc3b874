use crate::calendar::{
    CalendarView, CellData, ClickEvent, ClickHandler, ContributionCalendar, Motion, ParsedDate,
};
use crate::details::Details;
use crate::help::Help;
use crate::style::BASE_STYLE;
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use tracing::info;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct App<H> {
    view: CalendarView,
    calendar: ContributionCalendar,
    handler: H,
    state: AppState,
}

impl<H: ClickHandler> App<H> {
    pub(crate) fn new(view: CalendarView, calendar: ContributionCalendar, handler: H) -> App<H> {
        App {
            view,
            calendar,
            handler,
            state: AppState::Calendar,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left => self.view.move_cursor(Motion::PrevWeek),
                KeyCode::Char('l') | KeyCode::Right => self.view.move_cursor(Motion::NextWeek),
                KeyCode::Char('k') | KeyCode::Up => self.view.move_cursor(Motion::PrevDay),
                KeyCode::Char('j') | KeyCode::Down => self.view.move_cursor(Motion::NextDay),
                KeyCode::Char('0') | KeyCode::Home => self.view.move_cursor(Motion::First),
                KeyCode::Char('$') | KeyCode::End => self.view.move_cursor(Motion::Last),
                KeyCode::Enter | KeyCode::Char(' ') => self.click(key),
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping | AppState::Showing(_) => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Quitting => false,
        }
    }

    fn click(&mut self, key: KeyCode) -> bool {
        let Some(cell) = self.view.selected() else {
            return false;
        };
        let event = ClickEvent {
            key,
            coordinate: cell.coordinate(),
        };
        self.handler.on_click(&event, &cell.cell_data());
        self.state = AppState::Showing(Details::for_cell(cell));
        true
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }
}

impl<H> Widget for &mut App<H> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        self.calendar.render(area, buf, &mut self.view);
        match &self.state {
            AppState::Helping => Help(BASE_STYLE).render(area, buf),
            AppState::Showing(details) => details.render(area, buf),
            AppState::Calendar | AppState::Quitting => (),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Showing(Details),
    Quitting,
}

/// Click handler that records each activated day in the log
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct LogClicks;

impl ClickHandler for LogClicks {
    fn on_click(&mut self, event: &ClickEvent, cell: &CellData) {
        info!(
            date = %ParsedDate::from(cell.date),
            row = event.coordinate.row,
            col = event.coordinate.col,
            key = ?event.key,
            data = ?cell.data,
            "day activated"
        );
    }
}
