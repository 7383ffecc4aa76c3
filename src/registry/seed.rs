//! Deterministic demo seat layout, inserted once into an empty registry.

/// One section of the venue: `rows` rows of `seats_per_row` seats each.
#[derive(Debug, Clone)]
pub struct SectionSpec {
    pub name: String,
    pub rows: u32,
    pub seats_per_row: u32,
}

impl SectionSpec {
    pub fn new(name: &str, rows: u32, seats_per_row: u32) -> Self {
        Self {
            name: name.to_string(),
            rows,
            seats_per_row,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SeedLayout {
    pub sections: Vec<SectionSpec>,
}

/// A seat position to insert; ids are assigned by the store.
#[derive(Debug, Clone)]
pub struct SeedSeat {
    pub section: String,
    pub row: String,
    pub number: i32,
}

impl Default for SeedLayout {
    fn default() -> Self {
        SeedLayout {
            sections: vec![
                SectionSpec::new("Royal", 2, 8),
                SectionSpec::new("Prime Plus", 3, 10),
                SectionSpec::new("Prime", 3, 12),
                SectionSpec::new("Classic", 4, 12),
            ],
        }
    }
}

impl SeedLayout {
    /// All seat positions in insertion order: section by section, row labels
    /// `<section initial><row index>` starting at 1, numbers 1..=seats_per_row.
    pub fn seats(&self) -> Vec<SeedSeat> {
        let mut seats = Vec::with_capacity(self.seat_count());
        for section in &self.sections {
            let initial = section.name.chars().next().unwrap_or('?');
            for row_index in 1..=section.rows {
                let row = format!("{initial}{row_index}");
                for number in 1..=section.seats_per_row {
                    seats.push(SeedSeat {
                        section: section.name.clone(),
                        row: row.clone(),
                        number: number as i32,
                    });
                }
            }
        }
        seats
    }

    pub fn seat_count(&self) -> usize {
        self.sections
            .iter()
            .map(|s| (s.rows * s.seats_per_row) as usize)
            .sum()
    }
}
