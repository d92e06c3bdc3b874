use crate::calendar::{
    enumerate, load, ActivityIndex, ContributionCalendar, Grid, Theme, ThemeDescriptor,
    ThemeLevels, WeekStart,
};
use anyhow::Context;
use ratatui::style::{Color, Style};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use time::Date;
use tracing::{debug, info};

/// Where the activity JSON is read from
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum DataSource {
    Stdin,
    File(PathBuf),
}

impl DataSource {
    fn describe(&self) -> String {
        match self {
            DataSource::Stdin => String::from("<stdin>"),
            DataSource::File(path) => path.display().to_string(),
        }
    }
}

/// Settings gathered from the command line
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Options {
    pub(crate) data: DataSource,
    pub(crate) start: Option<String>,
    pub(crate) end: Option<String>,
    pub(crate) week_start: WeekStart,
    pub(crate) include_boundary: bool,
    pub(crate) theme: Theme,
    /// Takes precedence over `theme` when set
    pub(crate) theme_file: Option<PathBuf>,
    pub(crate) text_color: Option<Color>,
    pub(crate) cell_width: u16,
    pub(crate) cell_height: u16,
    pub(crate) dump: bool,
    pub(crate) log_file: Option<PathBuf>,
}

impl Options {
    pub(crate) fn new(data: DataSource) -> Options {
        Options {
            data,
            start: None,
            end: None,
            week_start: WeekStart::Sunday,
            include_boundary: false,
            theme: Theme::default(),
            theme_file: None,
            text_color: None,
            cell_width: 2,
            cell_height: 1,
            dump: false,
            log_file: None,
        }
    }

    /// The requested range as strings, with missing ends filled in from the
    /// year containing the date returned by `today`.  `today` is only called
    /// when an end is missing.
    pub(crate) fn range<F>(&self, today: F) -> anyhow::Result<(String, String)>
    where
        F: FnOnce() -> anyhow::Result<Date>,
    {
        if let (Some(start), Some(end)) = (&self.start, &self.end) {
            return Ok((start.clone(), end.clone()));
        }
        let year = today()?.year();
        let start = self
            .start
            .clone()
            .unwrap_or_else(|| format!("{year:04}-01-01"));
        let end = self.end.clone().unwrap_or_else(|| format!("{year:04}-12-31"));
        Ok((start, end))
    }

    pub(crate) fn grid<F>(&self, today: F) -> anyhow::Result<Grid>
    where
        F: FnOnce() -> anyhow::Result<Date>,
    {
        let (start, end) = self.range(today)?;
        let grid = enumerate(&start, &end, self.week_start)?;
        debug!(
            %start,
            %end,
            days = grid.range().len(),
            columns = grid.columns(),
            short = grid.is_short_range(),
            "laid out grid"
        );
        Ok(grid)
    }

    pub(crate) fn theme(&self) -> anyhow::Result<ThemeLevels> {
        let theme = match &self.theme_file {
            Some(path) => Theme::Custom(read_theme_file(path)?),
            None => self.theme.clone(),
        };
        debug!(icons = theme.is_icon_theme(), "resolving theme");
        Ok(theme.resolve()?)
    }

    pub(crate) fn activity(&self) -> anyhow::Result<ActivityIndex> {
        let source = self.data.describe();
        let index = match &self.data {
            DataSource::Stdin => load(io::stdin().lock()),
            DataSource::File(path) => {
                let fp = File::open(path)
                    .with_context(|| format!("failed to open data file {source}"))?;
                load(BufReader::new(fp))
            }
        }
        .with_context(|| format!("failed to parse activity data from {source}"))?;
        info!(%source, days = index.len(), "loaded activity data");
        Ok(index)
    }

    pub(crate) fn calendar(&self) -> ContributionCalendar {
        let text_style = match self.text_color {
            Some(color) => Style::new().fg(color),
            None => Style::new(),
        };
        ContributionCalendar::new()
            .cell_size(self.cell_width, self.cell_height)
            .text_style(text_style)
            .include_boundary(self.include_boundary)
    }
}

fn read_theme_file(path: &Path) -> anyhow::Result<ThemeDescriptor> {
    let fp = File::open(path)
        .with_context(|| format!("failed to open theme file {}", path.display()))?;
    serde_json::from_reader(BufReader::new(fp))
        .with_context(|| format!("failed to parse theme file {}", path.display()))
}
