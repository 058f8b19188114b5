use super::*;
use crate::render::TableRenderer;

fn record(atomic_number: u32, symbol: &str, name: &str) -> ElementRecord {
    ElementRecord {
        atomic_number,
        atomic_weight: f64::from(atomic_number) * 2.0,
        symbol: symbol.to_string(),
        name: name.to_string(),
        series: "Nonmetal".to_string(),
        oxidation_states: Vec::new(),
        wikipedia_url: format!("https://en.wikipedia.org/wiki/{name}"),
    }
}

fn catalog_of(specs: &[(u32, &str, &str)]) -> (Catalog, TableRenderer) {
    let mut renderer = TableRenderer::new();
    let records = specs
        .iter()
        .map(|(number, symbol, name)| record(*number, symbol, name))
        .collect();
    let catalog = Catalog::build(records, &mut renderer);
    (catalog, renderer)
}

#[test]
fn oxidation_display_prefixes_positive_states() {
    let mut rec = record(1, "H", "Hydrogen");
    rec.oxidation_states = vec![1, -1];
    assert_eq!(rec.oxidation_display(), "+1, -1");
    rec.oxidation_states = vec![-2];
    assert_eq!(rec.oxidation_display(), "-2");
    rec.oxidation_states = Vec::new();
    assert_eq!(rec.oxidation_display(), "");
}

#[test]
fn build_creates_one_row_per_record() {
    let (catalog, renderer) = catalog_of(&[(1, "H", "Hydrogen"), (2, "He", "Helium")]);
    assert_eq!(catalog.elements().len(), 2);
    assert_eq!(renderer.visible_rows().len(), 2);
}

#[test]
fn set_thumbnail_transitions_absent_to_present_only() {
    let (mut catalog, _renderer) = catalog_of(&[(2, "He", "Helium")]);
    assert!(catalog.set_thumbnail("Helium", "https://img/he.png").is_some());
    // A second write must not replace the first.
    assert!(catalog.set_thumbnail("Helium", "https://img/other.png").is_none());
    assert_eq!(
        catalog.elements()[0].thumbnail.as_deref(),
        Some("https://img/he.png")
    );
    assert_eq!(catalog.thumbnail_count(), 1);
}

#[test]
fn set_thumbnail_unknown_name_is_noop() {
    let (mut catalog, _renderer) = catalog_of(&[(1, "H", "Hydrogen")]);
    assert!(catalog.set_thumbnail("Unobtainium", "https://img/x.png").is_none());
    assert_eq!(catalog.thumbnail_count(), 0);
}

#[test]
fn reorder_permutes_without_dropping() {
    let (mut catalog, _renderer) = catalog_of(&[
        (1, "H", "Hydrogen"),
        (2, "He", "Helium"),
        (3, "Li", "Lithium"),
    ]);
    catalog.reorder(&[2, 0, 1]);
    assert_eq!(catalog.names_in_order(), vec!["Lithium", "Hydrogen", "Helium"]);
    assert_eq!(catalog.elements().len(), 3);
}
