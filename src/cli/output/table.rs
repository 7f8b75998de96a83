//! Table output formatting for CLI commands
//!
//! Renders artists, concert indexes and statistics with comfy-table.
//! Honors `NO_COLOR` and dumb terminals.

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use std::collections::BTreeMap;
use std::env;
use std::fmt::Display;

use crate::domain::models::{
    Artist, ArtistConcertsIndex, ArtistDatesIndex, ArtistLocationsIndex, CatalogStatistics,
};

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
    /// Maximum width for tables (None = auto)
    max_width: Option<u16>,
}

impl TableFormatter {
    /// Create a new table formatter
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    /// Create a new table formatter with custom settings
    pub const fn with_config(use_colors: bool, max_width: Option<u16>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    /// Format the artist list as a table
    pub fn format_artists(&self, artists: &[Artist]) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["ID", "Name", "Members", "Created", "First Album"]));

        for artist in artists {
            table.add_row(vec![
                Cell::new(artist.id),
                self.name_cell(&artist.name),
                Cell::new(truncate_text(&artist.members.join(", "), 60)),
                Cell::new(artist.creation_date),
                Cell::new(&artist.first_album),
            ]);
        }

        table.to_string()
    }

    /// Format one artist with its concerts
    pub fn format_artist_detail(&self, artist: &Artist) -> String {
        let mut profile = self.create_base_table();
        profile.set_header(header(&["Field", "Value"]));
        profile.add_row(vec![Cell::new("ID"), Cell::new(artist.id)]);
        profile.add_row(vec![Cell::new("Name"), self.name_cell(&artist.name)]);
        profile.add_row(vec![Cell::new("Members"), Cell::new(artist.members.join("\n"))]);
        profile.add_row(vec![Cell::new("Created"), Cell::new(artist.creation_date)]);
        profile.add_row(vec![Cell::new("First Album"), Cell::new(&artist.first_album)]);
        profile.add_row(vec![Cell::new("Image"), Cell::new(&artist.image)]);

        let mut concerts = self.create_base_table();
        concerts.set_header(header(&["Location", "Dates"]));
        for (location, dates) in artist.relations_data.iter().flatten() {
            concerts.add_row(vec![Cell::new(location), Cell::new(dates.join(", "))]);
        }

        format!("{profile}\n{concerts}")
    }

    /// Format the concerts index, one row per artist and location
    pub fn format_concerts(&self, concerts: &ArtistConcertsIndex) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["Artist", "Location", "Dates"]));

        for (name, relations) in concerts {
            for (location, dates) in relations {
                table.add_row(vec![
                    self.name_cell(name),
                    Cell::new(location),
                    Cell::new(dates.join(", ")),
                ]);
            }
        }

        table.to_string()
    }

    /// Format the locations index
    pub fn format_locations(&self, locations: &ArtistLocationsIndex) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["Artist", "Count", "Locations"]));

        for (name, places) in locations {
            let places: Vec<&str> = places.iter().map(String::as_str).collect();
            table.add_row(vec![
                self.name_cell(name),
                Cell::new(places.len()),
                Cell::new(places.join(", ")),
            ]);
        }

        table.to_string()
    }

    /// Format the dates index
    pub fn format_dates(&self, dates: &ArtistDatesIndex) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["Artist", "Count", "Dates"]));

        for (name, artist_dates) in dates {
            table.add_row(vec![
                self.name_cell(name),
                Cell::new(artist_dates.len()),
                Cell::new(artist_dates.join(", ")),
            ]);
        }

        table.to_string()
    }

    /// Format catalogue statistics as one histogram table per dimension
    pub fn format_statistics(&self, stats: &CatalogStatistics) -> String {
        let sections = [
            self.histogram("Created", &stats.by_creation_year),
            self.histogram("Members", &stats.by_member_count),
            self.histogram("First Album", &stats.by_first_album_year),
        ];

        format!("Total artists: {}\n{}", stats.total_artists, sections.join("\n"))
    }

    fn histogram<K: Display>(&self, label: &str, counts: &BTreeMap<K, usize>) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&[label, "Artists"]));
        for (key, count) in counts {
            table.add_row(vec![Cell::new(key), Cell::new(count)]);
        }
        table.to_string()
    }

    fn name_cell(&self, name: &str) -> Cell {
        let cell = Cell::new(truncate_text(name, 40));
        if self.use_colors {
            cell.fg(Color::Cyan)
        } else {
            cell
        }
    }

    /// Create a base table with common settings
    fn create_base_table(&self) -> Table {
        let mut table = Table::new();

        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(width);
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn header(titles: &[&str]) -> Vec<Cell> {
    titles
        .iter()
        .map(|title| Cell::new(title).add_attribute(Attribute::Bold))
        .collect()
}

/// Check if terminal supports colors
fn supports_color() -> bool {
    // Respect NO_COLOR environment variable
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    true
}

/// Truncate text to a maximum number of characters, appending "..."
fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
