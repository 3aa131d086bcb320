//! Terminal presentation surface.
//!
//! Reads answers line by line from an async reader and draws tables on a
//! writer. Stdin and stdout in the binary, byte buffers in tests.

use std::{
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    io::{self, Write},
};

use async_trait::async_trait;
use autovault::{
    catalog::{
        render::{CardGrid, StatisticsPanel},
        surface::{Notice, Severity, Surface},
    },
    vehicles::form::EditForm,
};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::warn;

pub struct Terminal<R, W> {
    input: Lines<R>,
    output: W,
    assume_yes: bool,
    statistics: Option<StatisticsPanel>,
    grid: Option<CardGrid>,
    editing: Option<EditForm>,
}

impl<R, W> Terminal<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    /// With `assume_yes`, every confirmation is answered yes without reading
    /// input.
    pub fn new(input: R, output: W, assume_yes: bool) -> Self {
        Self {
            input: input.lines(),
            output,
            assume_yes,
            statistics: None,
            grid: None,
            editing: None,
        }
    }

    /// Next input line, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns the underlying read error.
    pub async fn read_line(&mut self) -> io::Result<Option<String>> {
        self.input.next_line().await
    }

    /// Print `label` without a newline and read the answer.
    ///
    /// # Errors
    ///
    /// Returns the underlying read or write error.
    pub async fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        self.read_line().await
    }

    /// Print one line.
    pub fn say(&mut self, text: impl Display) {
        if let Err(error) = writeln!(self.output, "{text}") {
            warn!("failed to write to terminal: {error}");
        }
    }

    /// Print the last rendered card grid again.
    pub fn show_cards(&mut self) {
        match self.grid.take() {
            Some(grid) => {
                self.draw_cards(&grid);
                self.grid = Some(grid);
            }
            None => self.say("No vehicles loaded."),
        }
    }

    /// Print the last rendered statistics panel.
    pub fn show_statistics(&mut self) {
        match self.statistics.as_ref().map(statistics_table) {
            Some(table) => self.say(table),
            None => self.say("No statistics loaded."),
        }
    }

    /// Edit form currently open, if any.
    pub fn editing(&self) -> Option<&EditForm> {
        self.editing.as_ref()
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn draw_cards(&mut self, grid: &CardGrid) {
        if let Some(placeholder) = grid.placeholder() {
            self.say(placeholder);
        } else {
            self.say(cards_table(grid));
        }

        self.say(&grid.count_label);
    }
}

impl<R, W> Debug for Terminal<R, W> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Terminal")
            .field("assume_yes", &self.assume_yes)
            .field("editing", &self.editing)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<R, W> Surface for Terminal<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    fn render_statistics(&mut self, panel: &StatisticsPanel) {
        self.statistics = Some(panel.clone());
    }

    fn render_cards(&mut self, grid: &CardGrid) {
        self.draw_cards(grid);
        self.grid = Some(grid.clone());
    }

    fn render_error(&mut self, message: &str) {
        self.grid = None;
        self.say(message);
    }

    fn notify(&mut self, notice: Notice) {
        let marker = match notice.severity {
            Severity::Success => "✓",
            Severity::Error => "✗",
        };

        self.say(format!("{marker} {}", notice.message));
    }

    async fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            self.say(format!("{prompt} [y/N] y"));

            return true;
        }

        match self.prompt(&format!("{prompt} [y/N] ")).await {
            Ok(Some(answer)) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Ok(None) => false,
            Err(error) => {
                warn!("failed to read confirmation: {error}");

                false
            }
        }
    }

    // Every `add` starts from empty prompts.
    fn reset_create_form(&mut self) {}

    fn open_edit(&mut self, form: EditForm) {
        self.editing = Some(form);
    }

    fn close_edit(&mut self) {
        self.editing = None;
    }
}

fn cards_table(grid: &CardGrid) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Id", "Vehicle", "Year | Category", "Chassis", "Price"]);

    for card in &grid.cards {
        builder.push_record([
            card.id.to_string(),
            card.title.clone(),
            card.subtitle.clone(),
            card.chassis.clone(),
            card.price.clone(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(4..5), Alignment::right());

    table.to_string()
}

fn statistics_table(panel: &StatisticsPanel) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Statistic", "Value"]);
    builder.push_record(["Total Vehicles", panel.total.as_str()]);
    builder.push_record(["Total Value", panel.total_value.as_str()]);
    builder.push_record(["SUV", panel.suv.as_str()]);
    builder.push_record(["Sedan", panel.sedan.as_str()]);
    builder.push_record(["Hatchback", panel.hatchback.as_str()]);
    builder.push_record(["Sub4m", panel.sub4m.as_str()]);

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(1..2), Alignment::right());

    table.to_string()
}

#[cfg(test)]
mod tests {
    use autovault::{
        catalog::{render::PLACEHOLDER, statistics::Statistics, surface::VEHICLE_ADDED},
        vehicles::records::{Category, Vehicle, VehicleId},
    };
    use testresult::TestResult;

    use super::*;

    type BufferTerminal = Terminal<&'static [u8], Vec<u8>>;

    fn terminal(input: &'static str, assume_yes: bool) -> BufferTerminal {
        Terminal::new(input.as_bytes(), Vec::new(), assume_yes)
    }

    fn printed(terminal: &BufferTerminal) -> TestResult<String> {
        Ok(String::from_utf8(terminal.output().clone())?)
    }

    fn vehicle() -> Vehicle {
        Vehicle {
            id: VehicleId::from("v1"),
            make: "Mahindra".to_string(),
            model: "Thar".to_string(),
            chassis: "MH4X4".to_string(),
            category: Category::Suv,
            year: Some(2022),
            price: Some(1_550_000.0),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn cards_render_as_a_table_with_count() -> TestResult {
        let vehicle = vehicle();
        let mut terminal = terminal("", false);

        terminal.render_cards(&CardGrid::from_vehicles(&[&vehicle]));

        let output = printed(&terminal)?;

        assert!(output.contains("Mahindra Thar"), "missing title: {output}");
        assert!(output.contains("2022 | SUV"), "missing subtitle: {output}");
        assert!(output.contains("VIN: MH4X4"), "missing chassis: {output}");
        assert!(output.contains("₹15,50,000"), "missing price: {output}");
        assert!(output.contains("1 VEHICLE AVAILABLE"), "missing count: {output}");

        Ok(())
    }

    #[test]
    fn empty_grid_prints_placeholder() -> TestResult {
        let mut terminal = terminal("", false);

        terminal.render_cards(&CardGrid::from_vehicles(&[]));

        let output = printed(&terminal)?;

        assert!(output.contains(PLACEHOLDER), "missing placeholder: {output}");
        assert!(output.contains("0 VEHICLES AVAILABLE"), "missing count: {output}");

        Ok(())
    }

    #[test]
    fn statistics_are_shown_on_request() -> TestResult {
        let vehicle = vehicle();
        let mut terminal = terminal("", false);

        terminal.render_statistics(&StatisticsPanel::from(&Statistics::from_vehicles(&[
            vehicle,
        ])));

        assert!(printed(&terminal)?.is_empty());

        terminal.show_statistics();

        let output = printed(&terminal)?;

        assert!(output.contains("Total Vehicles"), "missing row: {output}");
        assert!(output.contains("₹15,50,000"), "missing value: {output}");

        Ok(())
    }

    #[test]
    fn load_error_replaces_the_grid() -> TestResult {
        let vehicle = vehicle();
        let mut terminal = terminal("", false);

        terminal.render_cards(&CardGrid::from_vehicles(&[&vehicle]));
        terminal.render_error("Error loading vehicles");
        terminal.show_cards();

        let output = printed(&terminal)?;

        assert!(output.contains("Error loading vehicles"), "missing error: {output}");
        assert!(output.ends_with("No vehicles loaded.\n"), "grid kept: {output}");

        Ok(())
    }

    #[test]
    fn notices_are_marked_by_severity() -> TestResult {
        let mut terminal = terminal("", false);

        terminal.notify(VEHICLE_ADDED);

        assert_eq!(printed(&terminal)?, "✓ Vehicle added to Vault!\n");

        Ok(())
    }

    #[tokio::test]
    async fn confirm_accepts_yes_only() {
        let mut terminal = terminal("y\nno\nYES\n", false);

        assert!(terminal.confirm("Remove?").await);
        assert!(!terminal.confirm("Remove?").await);
        assert!(terminal.confirm("Remove?").await);
        assert!(!terminal.confirm("Remove?").await, "end of input declines");
    }

    #[tokio::test]
    async fn assume_yes_skips_input() -> TestResult {
        let mut terminal = terminal("n\n", true);

        assert!(terminal.confirm("Remove this vehicle from vault?").await);
        assert_eq!(
            printed(&terminal)?,
            "Remove this vehicle from vault? [y/N] y\n"
        );
        assert_eq!(terminal.read_line().await?.as_deref(), Some("n"));

        Ok(())
    }
}
