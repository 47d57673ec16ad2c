//! End-to-end tests for `export_product`: storefront document in, product and
//! combination rows out, rendered through the CSV writer where the column
//! layout matters.

use bathcat_core::{AttributeKind, AttributeScan, IdAllocator};
use serde_json::{json, Value};

use bathcat_export::{
    export_product, inspect_attributes, write_rows, CombinationRow, ExportError, ExportRow,
    ExportSettings, ProductRow,
};

fn settings() -> ExportSettings {
    ExportSettings {
        image_url_template: "https://cdn.test/{public_id}".to_string(),
        ..ExportSettings::default()
    }
}

fn document(product: Value) -> Value {
    json!({ "state": { "product": { "product": product } } })
}

fn option(attribute_id: i64, option_id: i64, name: &str) -> Value {
    json!({ "attribute_id": attribute_id, "option_id": option_id, "name": name })
}

fn swatch(attribute_id: i64, option_id: i64, name: &str) -> Value {
    json!({ "attribute_id": attribute_id, "option_id": option_id, "name": name, "hex": "#000000" })
}

fn variant(reference: &str, price: i64, options: Vec<Value>, colors: Vec<Value>) -> Value {
    json!({
        "ref": reference,
        "prices": { "pvp_web": price },
        "options": { "options": options, "colors": colors }
    })
}

/// Three variants over width and finish; the third adds a mirror option.
fn vanity_unit() -> Value {
    json!({
        "state": {
            "product": {
                "product": {
                    "id": 4411,
                    "name": "Conjunto mueble Easy",
                    "slug": "conjunto-mueble-easy",
                    "ref": "EASY",
                    "supplier": { "name": "Royo" },
                    "prices": { "pvp_web": 10000, "pvp_supplier": 12500, "web_discount": 20 },
                    "images": [
                        { "public_id": "easy/main", "attributes": [] },
                        { "public_id": "easy/white", "attributes": [501] },
                        { "public_id": "easy/oak", "attributes": [502] }
                    ],
                    "seo": { "short_description": "Mueble; suspendido\n\"Easy\"" },
                    "variants": [
                        variant("EASY-80-W", 10000, vec![option(10, 500, "80 cm")], vec![swatch(11, 501, "color Blanco")]),
                        variant("EASY-100-O", 12000, vec![option(10, 600, "100 cm")], vec![swatch(11, 502, "color Roble")]),
                        variant("EASY-100-W-M", 10000, vec![option(10, 600, "100 cm"), option(12, 700, "Con espejo")], vec![swatch(11, 501, "color Blanco")])
                    ]
                },
                "technical_data": [
                    { "attribute": { "name": "Serie" }, "options": [{ "option": { "value_string": "Easy" } }], "position": 0 },
                    { "attribute": { "name": "serie" }, "options": [{ "option": { "value_string": "Easy 2" } }], "position": 1 }
                ]
            }
        }
    })
}

fn trailing_positions(list: &str) -> Vec<usize> {
    list.split(',')
        .map(|entry| {
            entry
                .rsplit(':')
                .next()
                .and_then(|p| p.parse().ok())
                .expect("entry ends with a position")
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn simple_product_without_discount() {
    let doc = document(json!({
        "id": 1,
        "prices": { "pvp_web": 10000, "pvp_supplier": 10000 },
        "variants": []
    }));
    let export = export_product(&doc, &mut IdAllocator::new(87, 1), &settings()).expect("export");
    assert_eq!(export.product.price_tax_excluded, "82.644628");
    assert!(!export.product.on_sale);
    assert_eq!(export.product.discount_amount, "");
}

#[test]
fn discounted_product() {
    let doc = document(json!({
        "id": 1,
        "prices": { "pvp_web": 8000, "pvp_supplier": 10000 },
        "variants": []
    }));
    let export = export_product(&doc, &mut IdAllocator::new(87, 1), &settings()).expect("export");
    assert!(export.product.on_sale);
    assert_eq!(export.product.discount_amount, "20.00");
}

#[test]
fn two_variant_finish_as_select_options() {
    let doc = document(json!({
        "id": 2,
        "prices": { "pvp_web": 5000 },
        "variants": [
            variant("R", 5000, vec![option(1, 11, "Red")], vec![]),
            variant("B", 5000, vec![option(1, 12, "Blue")], vec![])
        ]
    }));
    let export = export_product(&doc, &mut IdAllocator::new(87, 1), &settings()).expect("export");
    let rows = &export.combinations;
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.attributes == "Finish:select:0"));
    assert_eq!(rows[0].values, "Red:0");
    assert_eq!(rows[1].values, "Blue:0");
    assert!(rows[0].is_default);
    assert!(!rows[1].is_default);
}

#[test]
fn two_variant_finish_as_swatches() {
    let doc = document(json!({
        "id": 2,
        "prices": { "pvp_web": 5000 },
        "variants": [
            variant("R", 5500, vec![], vec![swatch(1, 11, "Red")]),
            variant("B", 5000, vec![], vec![swatch(1, 12, "Blue")])
        ]
    }));
    let export = export_product(&doc, &mut IdAllocator::new(87, 1), &settings()).expect("export");
    assert_eq!(export.descriptors[0].kind, AttributeKind::Color);
    let rows = &export.combinations;
    assert!(rows.iter().all(|r| r.attributes == "Finish:color:0"));
    assert_eq!(rows[0].values, "Red:0");
    assert_eq!(rows[1].values, "Blue:0");
    assert!(!rows[0].is_default);
    assert!(rows[1].is_default);
}

#[test]
fn empty_variant_list_still_yields_product_row() {
    let doc = document(json!({ "id": 3, "name": "Lavabo", "variants": [] }));
    let export = export_product(&doc, &mut IdAllocator::new(87, 1), &settings()).expect("export");
    assert_eq!(export.product.product_id, 87);
    assert!(export.combinations.is_empty());
    assert!(export.descriptors.is_empty());
}

#[test]
fn denylisted_image_is_never_exported() {
    let settings = ExportSettings {
        image_denylist: vec!["easy/main".to_string()],
        ..settings()
    };
    let doc = document(json!({
        "id": 4,
        "images": [
            { "public_id": "easy/main", "attributes": [] },
            { "public_id": "easy/side", "attributes": [] }
        ],
        "variants": [variant("A", 0, vec![option(1, 1, "80 cm")], vec![])]
    }));
    let export = export_product(&doc, &mut IdAllocator::new(87, 1), &settings).expect("export");
    assert_eq!(export.product.image_urls, "https://cdn.test/easy/side");
    assert_eq!(export.combinations[0].image_urls, "https://cdn.test/easy/side");
    assert!(!export.combinations[0].image_urls.contains("easy/main"));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn export_is_idempotent() {
    let doc = vanity_unit();
    let first = export_product(&doc, &mut IdAllocator::new(87, 1), &settings()).expect("export");
    let second = export_product(&doc, &mut IdAllocator::new(87, 1), &settings()).expect("export");
    assert_eq!(first.product, second.product);
    assert_eq!(first.combinations, second.combinations);

    let render = |rows: &[CombinationRow]| {
        let mut buf = Vec::new();
        write_rows(&mut buf, rows).expect("write");
        buf
    };
    assert_eq!(render(&first.combinations), render(&second.combinations));
}

#[test]
fn value_positions_match_header_positions() {
    let export =
        export_product(&vanity_unit(), &mut IdAllocator::new(87, 1), &settings()).expect("export");
    assert_eq!(export.descriptors.len(), 3);

    for row in &export.combinations {
        let header = trailing_positions(&row.attributes);
        let values = trailing_positions(&row.values);
        assert_eq!(header, vec![0, 1, 2]);
        assert_eq!(values, header, "row {} misaligned", row.reference);
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }
    assert_eq!(export.combinations[0].values, "80 cm:0,Blanco:1,N/A:2");
    assert_eq!(export.combinations[2].values, "100 cm:0,Blanco:1,Con espejo:2");
}

#[test]
fn legacy_scan_only_sees_first_variant() {
    let settings = ExportSettings {
        attribute_scan: AttributeScan::FirstVariant,
        ..settings()
    };
    let export =
        export_product(&vanity_unit(), &mut IdAllocator::new(87, 1), &settings).expect("export");
    assert_eq!(export.descriptors.len(), 2);
    assert_eq!(
        export.combinations[2].attributes,
        "Measurement:select:0,Finish:color:1"
    );
}

#[test]
fn at_most_one_default_per_product() {
    let export =
        export_product(&vanity_unit(), &mut IdAllocator::new(87, 1), &settings()).expect("export");
    let defaults = export.combinations.iter().filter(|r| r.is_default).count();
    assert_eq!(defaults, 1);
    assert!(export.combinations[0].is_default);
}

#[test]
fn variant_images_follow_option_associations() {
    let export =
        export_product(&vanity_unit(), &mut IdAllocator::new(87, 1), &settings()).expect("export");
    assert_eq!(export.combinations[0].image_positions, "2");
    assert_eq!(export.combinations[1].image_positions, "3");
    assert_eq!(export.combinations[1].image_urls, "https://cdn.test/easy/oak");
}

#[test]
fn sanitized_output_has_no_delimiters_or_quotes() {
    let export =
        export_product(&vanity_unit(), &mut IdAllocator::new(87, 1), &settings()).expect("export");
    for value in export.product.record() {
        assert!(!value.contains(';'), "{value:?}");
        assert!(!value.contains('"'), "{value:?}");
        assert!(!value.chars().any(|c| c.is_ascii_control()), "{value:?}");
    }
    assert_eq!(export.product.summary, "Mueble, suspendido Easy");
}

#[test]
fn technical_attributes_appear_once() {
    let export =
        export_product(&vanity_unit(), &mut IdAllocator::new(87, 1), &settings()).expect("export");
    assert_eq!(export.product.features, "Serie:Easy:0");
}

#[test]
fn product_csv_has_full_width_rows() {
    let export =
        export_product(&vanity_unit(), &mut IdAllocator::new(87, 1), &settings()).expect("export");
    let mut buf = Vec::new();
    write_rows(&mut buf, std::slice::from_ref(&export.product)).expect("write");

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .from_reader(buf.as_slice());
    let record = reader
        .records()
        .next()
        .expect("one record")
        .expect("valid record");
    assert_eq!(record.len(), ProductRow::HEADERS.len());
    assert_eq!(&record[0], "87");
    assert_eq!(&record[4], "82.644628");
}

// ---------------------------------------------------------------------------
// Failures and ID allocation
// ---------------------------------------------------------------------------

#[test]
fn ids_are_only_allocated_for_exported_products() {
    let mut ids = IdAllocator::new(87, 1);
    let broken = document(json!({ "id": 9 }));

    assert!(matches!(
        export_product(&broken, &mut ids, &settings()),
        Err(ExportError::MissingMandatoryField { .. })
    ));
    assert_eq!(ids.peek(), 87);

    let ok = export_product(&vanity_unit(), &mut ids, &settings()).expect("export");
    assert_eq!(ok.product.product_id, 87);
    assert!(ok.combinations.iter().all(|r| r.product_id == 87));
    assert_eq!(ids.peek(), 88);
}

#[test]
fn malformed_options_are_reported_not_fatal() {
    let doc = document(json!({
        "id": 5,
        "variants": [{
            "prices": { "pvp_web": 0 },
            "options": { "options": [{ "option_id": 1, "name": "80 cm" }, { "attribute_id": 2, "option_id": 3, "name": "Blanco" }] }
        }]
    }));
    let export = export_product(&doc, &mut IdAllocator::new(87, 1), &settings()).expect("export");
    assert_eq!(export.skipped_options.len(), 1);
    assert_eq!(export.combinations.len(), 1);
    assert_eq!(export.combinations[0].values, "Blanco:0");
}

#[test]
fn name_collisions_are_reported() {
    let doc = document(json!({
        "id": 6,
        "variants": [variant("A", 0, vec![option(1, 1, "80 cm"), option(2, 2, "45 cm")], vec![])]
    }));
    let export = export_product(&doc, &mut IdAllocator::new(87, 1), &settings()).expect("export");
    assert_eq!(export.descriptors.len(), 2);
    assert_eq!(export.collisions.len(), 1);
    assert_eq!(export.collisions[0].attribute_ids, vec!["1", "2"]);
}

#[test]
fn inspect_does_not_need_an_allocator() {
    let report = inspect_attributes(&vanity_unit(), &settings()).expect("inspect");
    assert_eq!(report.source_id, "4411");
    assert_eq!(report.variant_count, 3);
    let names: Vec<&str> = report
        .descriptors
        .iter()
        .map(|d| d.display_name.as_str())
        .collect();
    assert_eq!(names, vec!["Measurement", "Finish", "Mirror"]);
}
