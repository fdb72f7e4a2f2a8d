//! Human-readable rendering of identification results.

use std::fmt::Write;

use crate::types::IdentificationResult;

/// How many common names a candidate block shows at most.
const MAX_COMMON_NAMES: usize = 3;

const CLOSING_TIP: &str =
    "Tip: photos of several organs (leaf, flower, fruit, bark) of the same plant \
     give the most reliable identification.";

/// Render a fixed-order plain-text report.
///
/// Pure and deterministic: no I/O, and candidates appear exactly in the
/// order the upstream ranked them — never re-sorted here.
pub fn render(result: &IdentificationResult) -> String {
    let mut out = String::new();

    let best = result.best_match.as_deref().unwrap_or("no match");
    let _ = writeln!(out, "Best match: {best}");

    match result.remaining_identification_requests {
        Some(remaining) => {
            let _ = writeln!(out, "Remaining identification requests: {remaining}");
        }
        None => {
            let _ = writeln!(out, "Remaining identification requests: unknown");
        }
    }

    let version = result.version.as_deref().unwrap_or("unknown");
    let _ = writeln!(out, "Engine version: {version}");

    for (rank, candidate) in result.results.iter().enumerate() {
        let species = &candidate.species;
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{}. {} ({:.1}%)",
            rank + 1,
            species.scientific_name_without_author,
            candidate.score * 100.0
        );

        let authorship = if species.scientific_name_authorship.is_empty() {
            "unknown"
        } else {
            species.scientific_name_authorship.as_str()
        };
        let _ = writeln!(out, "   Authorship: {authorship}");
        let _ = writeln!(
            out,
            "   Family: {}",
            species.family.scientific_name_without_author
        );
        let _ = writeln!(
            out,
            "   Genus: {}",
            species.genus.scientific_name_without_author
        );

        if species.common_names.is_empty() {
            let _ = writeln!(out, "   Common names: none known");
        } else {
            let shown: Vec<&str> = species
                .common_names
                .iter()
                .take(MAX_COMMON_NAMES)
                .map(String::as_str)
                .collect();
            let _ = writeln!(out, "   Common names: {}", shown.join(", "));
        }

        if let Some(gbif) = &candidate.gbif {
            let _ = writeln!(out, "   GBIF: {}", gbif.id_display());
        }
        if let Some(powo) = &candidate.powo {
            let _ = writeln!(out, "   POWO: {}", powo.id_display());
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{CLOSING_TIP}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Candidate, RegistryRef, Species, Taxon};

    fn candidate(name: &str, score: f64) -> Candidate {
        Candidate {
            score,
            species: Species {
                scientific_name_without_author: name.to_string(),
                scientific_name_authorship: String::new(),
                genus: Taxon {
                    scientific_name_without_author: "Quercus".to_string(),
                },
                family: Taxon {
                    scientific_name_without_author: "Fagaceae".to_string(),
                },
                common_names: vec![],
            },
            gbif: None,
            powo: None,
        }
    }

    fn result_with(candidates: Vec<Candidate>) -> IdentificationResult {
        IdentificationResult {
            best_match: Some("Quercus robur L.".to_string()),
            results: candidates,
            remaining_identification_requests: Some(42),
            version: Some("2025-01-15 (7.3)".to_string()),
        }
    }

    #[test]
    fn header_lines_come_first_in_fixed_order() {
        let text = render(&result_with(vec![]));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Best match: Quercus robur L.");
        assert_eq!(lines[1], "Remaining identification requests: 42");
        assert_eq!(lines[2], "Engine version: 2025-01-15 (7.3)");
        assert!(text.trim_end().ends_with(CLOSING_TIP));
    }

    #[test]
    fn candidates_keep_upstream_order_even_when_scores_are_unsorted() {
        // Lower-scored candidate first: the upstream ranking wins.
        let text = render(&result_with(vec![
            candidate("Quercus petraea", 0.31),
            candidate("Quercus robur", 0.88),
        ]));

        let petraea = text.find("1. Quercus petraea (31.0%)").unwrap();
        let robur = text.find("2. Quercus robur (88.0%)").unwrap();
        assert!(petraea < robur);
    }

    #[test]
    fn missing_authorship_renders_unknown() {
        let text = render(&result_with(vec![candidate("Quercus robur", 0.9)]));
        assert!(text.contains("Authorship: unknown"));
        assert!(text.contains("Common names: none known"));
    }

    #[test]
    fn common_names_are_capped_at_three() {
        let mut c = candidate("Quercus robur", 0.9);
        c.species.common_names = vec![
            "English oak".to_string(),
            "Pedunculate oak".to_string(),
            "European oak".to_string(),
            "Common oak".to_string(),
        ];
        let text = render(&result_with(vec![c]));
        assert!(text.contains("Common names: English oak, Pedunculate oak, European oak"));
        assert!(!text.contains("Common oak"));
    }

    #[test]
    fn registry_ids_render_when_present() {
        let mut c = candidate("Quercus robur", 0.9);
        c.gbif = Some(RegistryRef {
            id: serde_json::json!("2878688"),
        });
        c.powo = Some(RegistryRef {
            id: serde_json::json!(320398),
        });
        let text = render(&result_with(vec![c]));
        assert!(text.contains("GBIF: 2878688"));
        assert!(text.contains("POWO: 320398"));
    }

    #[test]
    fn percentage_rounds_to_one_decimal() {
        let text = render(&result_with(vec![candidate("Quercus robur", 0.87654)]));
        assert!(text.contains("(87.7%)"));
    }

    #[test]
    fn empty_result_still_renders_deterministically() {
        let empty = IdentificationResult {
            best_match: None,
            results: vec![],
            remaining_identification_requests: None,
            version: None,
        };
        let text = render(&empty);
        assert!(text.starts_with("Best match: no match\n"));
        assert!(text.contains("Remaining identification requests: unknown"));
        assert_eq!(render(&empty), text);
    }
}
