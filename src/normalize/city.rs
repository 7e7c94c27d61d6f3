//! City name resolution
//!
//! Maps diacritic-bearing and Swedish-language Nordic city names to a single
//! ASCII/English spelling. Unmapped names pass through unchanged at medium
//! confidence since they are usually already correct.

use serde::{Deserialize, Serialize};

use crate::models::{FieldValue, Normalized, OrderedMap};

/// Lowercase local name to canonical spelling. Keys are lowercased on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "OrderedMap<String>", into = "OrderedMap<String>")]
pub struct CityTable {
    names: OrderedMap<String>,
}

impl Default for CityTable {
    fn default() -> Self {
        Self::nordic()
    }
}

const NORDIC_CITIES: &[(&str, &str)] = &[
    // Sweden
    ("göteborg", "Gothenburg"),
    ("malmö", "Malmo"),
    ("helsingborg", "Helsingborg"),
    ("hälsingborg", "Helsingborg"),
    ("norrköping", "Norrkoping"),
    ("linköping", "Linkoping"),
    ("örebro", "Orebro"),
    ("västerås", "Vasteras"),
    ("jönköping", "Jonkoping"),
    ("umeå", "Umea"),
    ("luleå", "Lulea"),
    ("gävle", "Gavle"),
    ("borås", "Boras"),
    ("södertälje", "Sodertalje"),
    ("eskilstuna", "Eskilstuna"),
    ("halmstad", "Halmstad"),
    ("växjö", "Vaxjo"),
    ("karlstad", "Karlstad"),
    ("sundsvall", "Sundsvall"),
    ("östersund", "Ostersund"),
    ("trollhättan", "Trollhattan"),
    ("lund", "Lund"),
    ("kalmar", "Kalmar"),
    ("falun", "Falun"),
    ("skellefteå", "Skelleftea"),
    ("kristianstad", "Kristianstad"),
    ("karlskrona", "Karlskrona"),
    ("skövde", "Skovde"),
    ("uddevalla", "Uddevalla"),
    ("varberg", "Varberg"),
    ("örnsköldsvik", "Ornskoldsvik"),
    ("nyköping", "Nykoping"),
    ("karlskoga", "Karlskoga"),
    ("motala", "Motala"),
    ("köping", "Koping"),
    ("värnamo", "Varnamo"),
    ("enköping", "Enkoping"),
    ("lidköping", "Lidkoping"),
    ("alingsås", "Alingsas"),
    ("ängelholm", "Angelholm"),
    ("mjölby", "Mjolby"),
    ("trelleborg", "Trelleborg"),
    ("mariestad", "Mariestad"),
    ("katrineholm", "Katrineholm"),
    ("köpenhamn", "Copenhagen"),
    ("helsingfors", "Helsinki"),
    // Denmark
    ("københavn", "Copenhagen"),
    ("köbenhavn", "Copenhagen"),
    ("københaven", "Copenhagen"),
    ("århus", "Aarhus"),
    ("ålborg", "Aalborg"),
    ("odense", "Odense"),
    ("roskilde", "Roskilde"),
    ("esbjerg", "Esbjerg"),
    ("kolding", "Kolding"),
    ("horsens", "Horsens"),
    ("vejle", "Vejle"),
    ("randers", "Randers"),
    ("viborg", "Viborg"),
    ("silkeborg", "Silkeborg"),
    ("herning", "Herning"),
    ("næstved", "Naestved"),
    ("frederiksberg", "Frederiksberg"),
    ("hørsholm", "Horsholm"),
    ("helsingør", "Helsingor"),
    // Finland, Swedish-language names
    ("åbo", "Turku"),
    ("tammerfors", "Tampere"),
    ("uleåborg", "Oulu"),
    ("vasa", "Vaasa"),
    ("björneborg", "Pori"),
    ("nystad", "Uusikaupunki"),
    ("jakobstad", "Pietarsaari"),
    ("mariehamn", "Mariehamn"),
    ("ekenäs", "Tammisaari"),
    ("borgå", "Porvoo"),
    ("lovisa", "Loviisa"),
    ("hangö", "Hanko"),
    ("karleby", "Kokkola"),
    ("gamlakarleby", "Kokkola"),
    ("kuopio", "Kuopio"),
    ("jyväskylä", "Jyvaskyla"),
    ("lahti", "Lahti"),
    ("espoo", "Espoo"),
    ("vantaa", "Vantaa"),
];

impl CityTable {
    /// Built-in Swedish, Danish and Finnish city names
    pub fn nordic() -> Self {
        NORDIC_CITIES
            .iter()
            .map(|(local, canonical)| (*local, canonical.to_string()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Add or replace a mapping; the local name is stored lowercase
    pub fn with_city(mut self, local: &str, canonical: impl Into<String>) -> Self {
        self.names.insert(local.to_lowercase(), canonical.into());
        self
    }

    pub fn resolve(&self, raw: &FieldValue) -> Normalized<String> {
        match raw {
            FieldValue::Text(text) => self.resolve_text(text),
            _ => Normalized::empty(),
        }
    }

    pub fn resolve_text(&self, text: &str) -> Normalized<String> {
        let text = text.trim();
        if text.is_empty() {
            return Normalized::empty();
        }

        let lookup = text.to_lowercase();
        match self.names.get(&lookup) {
            Some(canonical) => Normalized::high(canonical.clone()),
            None => Normalized::medium(text.to_string()),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, String)> for CityTable {
    fn from_iter<I: IntoIterator<Item = (K, String)>>(iter: I) -> Self {
        let names = iter
            .into_iter()
            .map(|(local, canonical)| (local.into().to_lowercase(), canonical))
            .collect();
        Self { names }
    }
}

impl From<OrderedMap<String>> for CityTable {
    fn from(names: OrderedMap<String>) -> Self {
        names.into_iter().collect()
    }
}

impl From<CityTable> for OrderedMap<String> {
    fn from(table: CityTable) -> Self {
        table.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Confidence;

    #[test]
    fn test_mapped_names() {
        let table = CityTable::nordic();
        assert_eq!(table.resolve_text("Göteborg"), Normalized::high("Gothenburg".to_string()));
        assert_eq!(table.resolve_text("MALMÖ").value, "Malmo");
        assert_eq!(table.resolve_text("København").value, "Copenhagen");
        assert_eq!(table.resolve_text("Åbo").value, "Turku");
        assert_eq!(table.resolve_text(" helsingfors ").value, "Helsinki");
    }

    #[test]
    fn test_unmapped_passes_through() {
        let table = CityTable::nordic();
        let result = table.resolve_text(" Stockholm ");
        assert_eq!(result.value, "Stockholm");
        assert_eq!(result.confidence, Confidence::Medium);
    }

    #[test]
    fn test_blank_and_non_text() {
        let table = CityTable::nordic();
        assert_eq!(table.resolve(&FieldValue::Null), Normalized::empty());
        assert_eq!(table.resolve(&FieldValue::from("")), Normalized::empty());
        assert_eq!(table.resolve(&FieldValue::Integer(1)), Normalized::empty());
    }

    #[test]
    fn test_loaded_keys_are_case_insensitive() {
        let table: CityTable = serde_yaml::from_str("Tromsø: Tromso").unwrap();
        assert_eq!(table.resolve_text("tromsø").value, "Tromso");

        let table = CityTable::nordic().with_city("Bergen", "Bergen");
        assert_eq!(table.resolve_text("BERGEN").confidence, Confidence::High);
    }
}
