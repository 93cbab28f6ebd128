//! Per-variant accumulation of recognized parts and final assembly.
//!
//! One accumulator is created per candidate variant at the start of a match
//! attempt, mutated only by adding matcher output, and consumed once to
//! produce the structured [`Address`] and a match-quality score.

use crate::tokens::join_range;
use crate::types::{Address, Level, RecognizedPart};
use crate::variant::{HYPHEN, SearchVariant};

/// Sentinel returned by [`AddressAccumulator::name_at_level`] when no part
/// exists at the requested level.
const ABSENT: &str = " ";

/// Working state that collects recognized parts for one variant and derives
/// the final structured address.
#[derive(Debug, Clone)]
pub struct AddressAccumulator {
    variant: SearchVariant,
    parts: Vec<RecognizedPart>,
    last_recognized: Option<usize>,
    unrecognized_count: usize,
}

impl AddressAccumulator {
    /// Create an accumulator owning its originating variant.
    pub fn new(variant: SearchVariant) -> Self {
        Self {
            variant,
            parts: Vec::new(),
            last_recognized: None,
            unrecognized_count: 0,
        }
    }

    /// Add a recognized part, keeping the part list sorted ascending by
    /// hierarchy level.
    ///
    /// `token_index` is the original-token position the part consumed; the
    /// highest such position seen so far decides where leftover
    /// building/apartment tokens start. `None` leaves the position
    /// bookkeeping untouched.
    pub fn add_part(&mut self, part: RecognizedPart, token_index: Option<usize>) {
        self.parts.push(part);
        self.parts.sort_by_key(|p| p.level);
        if let Some(index) = token_index {
            self.last_recognized = Some(match self.last_recognized {
                Some(current) => current.max(index),
                None => index,
            });
        }
    }

    /// Record a token that failed to resolve to any part.
    pub fn note_unrecognized(&mut self) {
        self.unrecognized_count += 1;
    }

    /// Score for ranking competing accumulators: recognized part count minus
    /// unrecognized count. Higher is better; may be negative.
    pub fn match_quality(&self) -> i64 {
        self.parts.len() as i64 - self.unrecognized_count as i64
    }

    /// Postal code of the most specific recognized part, or empty.
    pub fn postal_code(&self) -> &str {
        self.parts
            .last()
            .map(|part| part.postal_code.as_str())
            .unwrap_or("")
    }

    /// Display name of the part at exactly `level`, or a single blank-space
    /// sentinel when no such part exists.
    pub fn name_at_level(&self, level: Level) -> &str {
        self.parts
            .iter()
            .find(|part| part.level == level)
            .map(|part| part.name.as_str())
            .unwrap_or(ABSENT)
    }

    /// The originating variant.
    pub fn variant(&self) -> &SearchVariant {
        &self.variant
    }

    /// Recognized parts added so far, sorted ascending by level.
    pub fn parts(&self) -> &[RecognizedPart] {
        &self.parts
    }

    /// Highest original-token index consumed by a recognized part.
    pub fn last_recognized_index(&self) -> Option<usize> {
        self.last_recognized
    }

    /// Build the final structured address.
    ///
    /// Hierarchy fields come from the recognized parts (empty when not
    /// determined); the locality falls back to the sublocation part when no
    /// location-level part exists. The last variant token becomes the
    /// apartment iff it was never consumed by a recognized part, and
    /// whatever tokens sit between the last recognized token and the
    /// apartment become the hyphen-joined building designator.
    pub fn assemble(&self) -> Address {
        let mut address = Address {
            postal_code: self.postal_code().to_string(),
            region: determined(self.name_at_level(Level::Region)),
            district: determined(self.name_at_level(Level::District)),
            location: determined(self.name_at_level(Level::Location)),
            street: determined(self.name_at_level(Level::Street)),
            house_number: determined(self.name_at_level(Level::House)),
            building: String::new(),
            apartment: String::new(),
        };

        if address.location.is_empty() {
            address.location = determined(self.name_at_level(Level::Sublocation));
        }

        if self.variant.is_empty() {
            return address;
        }

        let apartment_index = self.variant.len() - 1;
        let consumed = self
            .last_recognized
            .is_some_and(|last| last >= apartment_index);
        if !consumed {
            address.apartment = self.variant.tokens()[apartment_index].clone();
        }

        let building_start = self.last_recognized.map_or(0, |last| last + 1);
        address.building = join_range(
            self.variant.tokens(),
            HYPHEN,
            building_start,
            apartment_index,
        );

        address
    }
}

/// Normalize the absent-level sentinel to the Address contract, where empty
/// means "not determined".
fn determined(name: &str) -> String {
    if name == ABSENT {
        String::new()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(name: &str, level: Level) -> RecognizedPart {
        RecognizedPart::new(name, level)
    }

    fn accumulator(tokens: &[&str]) -> AddressAccumulator {
        AddressAccumulator::new(SearchVariant::from_tokens(tokens.to_vec()))
    }

    #[test]
    fn test_parts_kept_sorted_by_level() {
        let mut acc = accumulator(&["Мира", "Кимры"]);
        acc.add_part(part("Мира", Level::Street), Some(0));
        acc.add_part(part("Кимры", Level::Location), Some(1));
        let levels: Vec<Level> = acc.parts().iter().map(|p| p.level).collect();
        assert_eq!(levels, [Level::Location, Level::Street]);
    }

    #[test]
    fn test_last_recognized_tracks_maximum() {
        let mut acc = accumulator(&["а", "б", "в"]);
        acc.add_part(part("б", Level::Street), Some(1));
        acc.add_part(part("а", Level::Location), Some(0));
        assert_eq!(acc.last_recognized_index(), Some(1));
        acc.add_part(part("в", Level::House), None);
        assert_eq!(acc.last_recognized_index(), Some(1));
    }

    #[test]
    fn test_match_quality_can_go_negative() {
        let mut acc = accumulator(&["х", "у"]);
        acc.note_unrecognized();
        acc.note_unrecognized();
        assert_eq!(acc.match_quality(), -2);
        acc.add_part(part("х", Level::Location), Some(0));
        assert_eq!(acc.match_quality(), -1);
    }

    #[test]
    fn test_postal_code_of_most_specific_part() {
        let mut acc = accumulator(&["Тверская", "Кимры"]);
        assert_eq!(acc.postal_code(), "");
        acc.add_part(
            part("Тверская область", Level::Region).with_postal_code("170000"),
            Some(0),
        );
        acc.add_part(
            part("Кимры", Level::Location).with_postal_code("171506"),
            Some(1),
        );
        assert_eq!(acc.postal_code(), "171506");
    }

    #[test]
    fn test_name_at_level_sentinel() {
        let mut acc = accumulator(&["Кимры"]);
        assert_eq!(acc.name_at_level(Level::Location), " ");
        acc.add_part(part("Кимры", Level::Location), Some(0));
        assert_eq!(acc.name_at_level(Level::Location), "Кимры");
        assert_eq!(acc.name_at_level(Level::Street), " ");
    }

    #[test]
    fn test_assemble_full_address_with_building_and_apartment() {
        // tokens: Кимры(0) Мира(1) 4(2) 2(3) 5(4)
        let mut acc = accumulator(&["Кимры", "Мира", "4", "2", "5"]);
        acc.add_part(part("Кимры", Level::Location), Some(0));
        acc.add_part(part("Мира", Level::Street), Some(1));
        acc.add_part(part("4", Level::House), Some(2));

        let address = acc.assemble();
        assert_eq!(address.location, "Кимры");
        assert_eq!(address.street, "Мира");
        assert_eq!(address.house_number, "4");
        assert_eq!(address.building, "2");
        assert_eq!(address.apartment, "5");
        assert_eq!(address.region, "");
    }

    #[test]
    fn test_assemble_no_apartment_when_last_token_consumed() {
        let mut acc = accumulator(&["Кимры", "Мира", "4"]);
        acc.add_part(part("Кимры", Level::Location), Some(0));
        acc.add_part(part("Мира", Level::Street), Some(1));
        acc.add_part(part("4", Level::House), Some(2));

        let address = acc.assemble();
        assert_eq!(address.apartment, "");
        assert_eq!(address.building, "");
    }

    #[test]
    fn test_assemble_sublocation_fallback() {
        let mut acc = accumulator(&["Заречный"]);
        acc.add_part(part("Заречный", Level::Sublocation), Some(0));
        let address = acc.assemble();
        assert_eq!(address.location, "Заречный");
    }

    #[test]
    fn test_assemble_nothing_recognized() {
        // building starts at token 0 when no part consumed anything
        let mut acc = accumulator(&["что-то", "12", "5"]);
        acc.note_unrecognized();
        acc.note_unrecognized();
        acc.note_unrecognized();

        let address = acc.assemble();
        assert_eq!(address.apartment, "5");
        assert_eq!(address.building, "что-то-12");
        assert_eq!(address.location, "");
        assert_eq!(address.postal_code, "");
    }

    #[test]
    fn test_assemble_empty_variant() {
        let acc = accumulator(&[]);
        let address = acc.assemble();
        assert!(address.is_empty());
    }

    #[test]
    fn test_partition_of_token_positions() {
        // recognized range, building range and apartment never overlap and
        // together cover all positions
        let mut acc = accumulator(&["а", "б", "в", "г", "д"]);
        acc.add_part(part("а", Level::Location), Some(0));
        acc.add_part(part("б", Level::Street), Some(1));

        let last = acc.last_recognized_index().unwrap();
        let apartment_index = acc.variant().len() - 1;
        assert!(last < apartment_index);

        let recognized: Vec<usize> = (0..=last).collect();
        let building: Vec<usize> = (last + 1..apartment_index).collect();
        let mut all = recognized.clone();
        all.extend(&building);
        all.push(apartment_index);
        assert_eq!(all, (0..acc.variant().len()).collect::<Vec<_>>());

        let address = acc.assemble();
        assert_eq!(address.building, "в-г");
        assert_eq!(address.apartment, "д");
    }
}
