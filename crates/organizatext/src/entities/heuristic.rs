//! Pattern-based entity recognizer for Spanish documents.
//!
//! Recognizes honorific-prefixed person names, "ciudad de X"-style places,
//! organizations ending in a legal-form suffix and numeric or long-form dates.
//! It favours precision over recall.

use super::{Entity, EntityKind, EntityRecognizer};
use crate::Result;
use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;

const NAME: &str = r"[A-ZÁÉÍÓÚÑ][a-záéíóúñü]+";

static PERSON_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(?:Sr|Sra|Srta|Dr|Dra|Lic|Ing)\.?\s+((?:{NAME})(?:\s+{NAME}){{0,2}})|\b(?:Don|Doña)\s+((?:{NAME})(?:\s+{NAME}){{0,2}})"
    ))
    .expect("Person regex pattern is valid and should compile")
});
static PLACE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(?:ciudad|provincia|municipio|departamento|estado|región|region) de ({NAME}(?:\s+{NAME})?)"
    ))
    .expect("Place regex pattern is valid and should compile")
});
static ORGANIZATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b((?:[A-ZÁÉÍÓÚÑ][\wÁÉÍÓÚÑáéíóúñ&-]*\s+){1,4}(?:S\.A\.S\.|S\.A\.|S\.L\.|Ltda\.|Inc\.|Corp\.|LLC|GmbH))",
    )
    .expect("Organization regex pattern is valid and should compile")
});
static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:\d{4}-\d{2}-\d{2}|\d{1,2}[/-]\d{1,2}[/-]\d{2,4}|\d{1,2} de (?:enero|febrero|marzo|abril|mayo|junio|julio|agosto|septiembre|setiembre|octubre|noviembre|diciembre)(?: de \d{4})?)\b",
    )
    .expect("Date regex pattern is valid and should compile")
});

/// Regex-driven [`EntityRecognizer`] with no external resources.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicRecognizer;

impl HeuristicRecognizer {
    pub fn new() -> Self {
        Self
    }

    fn collect(pattern: &Regex, text: &str, kind: EntityKind, out: &mut IndexSet<Entity>) {
        for captures in pattern.captures_iter(text) {
            let value = captures
                .iter()
                .skip(1)
                .flatten()
                .next()
                .or_else(|| captures.get(0))
                .map(|m| m.as_str().trim());

            if let Some(value) = value.filter(|v| !v.is_empty()) {
                out.insert(Entity::new(kind, value));
            }
        }
    }
}

impl EntityRecognizer for HeuristicRecognizer {
    fn name(&self) -> &str {
        "heuristic-es"
    }

    fn recognize(&self, text: &str) -> Result<Vec<Entity>> {
        let mut entities = IndexSet::new();
        Self::collect(&PERSON_PATTERN, text, EntityKind::Person, &mut entities);
        Self::collect(&PLACE_PATTERN, text, EntityKind::Place, &mut entities);
        Self::collect(&ORGANIZATION_PATTERN, text, EntityKind::Organization, &mut entities);
        Self::collect(&DATE_PATTERN, text, EntityKind::Date, &mut entities);
        Ok(entities.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(text: &str, kind: EntityKind) -> Vec<String> {
        HeuristicRecognizer
            .recognize(text)
            .unwrap()
            .into_iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.value)
            .collect()
    }

    #[test]
    fn test_people() {
        let text = "Reunión con la Dra. Marta Gómez y Don Luis Peña.";
        assert_eq!(values(text, EntityKind::Person), vec!["Marta Gómez", "Luis Peña"]);
    }

    #[test]
    fn test_places() {
        let text = "Oficina en la ciudad de Buenos Aires y en la provincia de Córdoba.";
        assert_eq!(values(text, EntityKind::Place), vec!["Buenos Aires", "Córdoba"]);
    }

    #[test]
    fn test_organizations() {
        let text = "Factura emitida por Servicios Andinos S.A. a Acme Inc. el lunes";
        assert_eq!(
            values(text, EntityKind::Organization),
            vec!["Servicios Andinos S.A.", "Acme Inc."]
        );
    }

    #[test]
    fn test_dates() {
        let text = "Vence el 2024-03-15, se firmó el 12/01/2024 y se pagó el 3 de marzo de 2024.";
        assert_eq!(
            values(text, EntityKind::Date),
            vec!["2024-03-15", "12/01/2024", "3 de marzo de 2024"]
        );
    }

    #[test]
    fn test_deduplicates_and_groups_by_kind() {
        let text = "El 01/02/2024 habló el Sr. Pablo Ruiz. El 01/02/2024 volvió el Sr. Pablo Ruiz.";
        let entities = HeuristicRecognizer.recognize(text).unwrap();
        assert_eq!(
            entities,
            vec![
                Entity::new(EntityKind::Person, "Pablo Ruiz"),
                Entity::new(EntityKind::Date, "01/02/2024"),
            ]
        );
    }

    #[test]
    fn test_plain_text_has_no_entities() {
        assert!(HeuristicRecognizer.recognize("lista de tareas pendientes").unwrap().is_empty());
    }
}
