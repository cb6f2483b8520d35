//! Search: composed filters, null-safety, sorting, pagination

use super::*;
use shared::models::{ProductStatus, ProductUpdate};
use shared::query::{ProductFilter, VariantFilter};

fn seed_inventory(catalog: &Catalog<MemoryStore>) -> CategoryId {
    let c = seed_category(catalog, "Inventory", None);
    for (name, price, stock) in [
        ("Anvil", "5.00", 1),
        ("Bolt Cutter", "20.00", 0),
        ("Crowbar", "30.00", 2),
    ] {
        seed_product(catalog, name, c.id, price, stock);
    }
    c.id
}

#[test]
fn test_all_null_filters_return_everything() {
    let catalog = create_test_catalog();
    seed_inventory(&catalog);

    let page = catalog
        .search_products(&ProductFilter::default(), 0, None)
        .unwrap();
    assert_eq!(page.total_elements, 3);
}

#[test]
fn test_min_price_and_in_stock_composition() {
    // Scenario: minPrice=10 + inStock=true over {5/1, 20/0, 30/2} -> only the third
    let catalog = create_test_catalog();
    seed_inventory(&catalog);

    let page = catalog
        .search_products(
            &ProductFilter {
                min_price: Some(dec("10")),
                in_stock: Some(true),
                ..Default::default()
            },
            0,
            None,
        )
        .unwrap();
    let names: Vec<&str> = page.content.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Crowbar"]);
}

#[test]
fn test_in_stock_false_is_dont_care() {
    let catalog = create_test_catalog();
    seed_inventory(&catalog);

    let page = catalog
        .search_products(
            &ProductFilter {
                in_stock: Some(false),
                ..Default::default()
            },
            0,
            None,
        )
        .unwrap();
    // no "out of stock only" clause is synthesized
    assert_eq!(page.total_elements, 3);
}

#[test]
fn test_price_range_bounds_are_inclusive() {
    let catalog = create_test_catalog();
    seed_inventory(&catalog);

    let page = catalog
        .search_products(
            &ProductFilter {
                min_price: Some(dec("5.00")),
                max_price: Some(dec("20.00")),
                ..Default::default()
            },
            0,
            None,
        )
        .unwrap();
    assert_eq!(page.total_elements, 2);
}

#[test]
fn test_search_term_spans_name_and_description() {
    let catalog = create_test_catalog();
    let c = seed_category(&catalog, "Misc", None);
    let p = seed_product(&catalog, "Plain Box", c.id, "1.00", 1);
    catalog
        .update_product(
            p.id,
            &ProductUpdate {
                description: Some("A sturdy crate for tools".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    seed_product(&catalog, "Steel Crate", c.id, "2.00", 1);

    let page = catalog
        .search_products(
            &ProductFilter {
                search: Some("crate".to_string()),
                ..Default::default()
            },
            0,
            None,
        )
        .unwrap();
    assert_eq!(page.total_elements, 2);
}

#[test]
fn test_filter_by_status_and_category() {
    let catalog = create_test_catalog();
    let inventory = seed_inventory(&catalog);
    let other = seed_category(&catalog, "Other", None);
    seed_product(&catalog, "Elsewhere", other.id, "9.99", 1);

    let page = catalog
        .search_products(
            &ProductFilter {
                category_id: Some(inventory),
                status: Some(ProductStatus::Active),
                ..Default::default()
            },
            0,
            None,
        )
        .unwrap();
    let names: Vec<&str> = page.content.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Anvil", "Crowbar"]);
}

#[test]
fn test_sort_by_price_and_default_name() {
    let catalog = create_test_catalog();
    seed_inventory(&catalog);

    let by_price = catalog
        .search_products(
            &ProductFilter {
                sort: Some("price".to_string()),
                ..Default::default()
            },
            0,
            None,
        )
        .unwrap();
    let names: Vec<&str> = by_price.content.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Anvil", "Bolt Cutter", "Crowbar"]);

    // unknown key falls back to name ascending
    let fallback = catalog
        .search_products(
            &ProductFilter {
                sort: Some("bogus".to_string()),
                ..Default::default()
            },
            0,
            None,
        )
        .unwrap();
    let names: Vec<&str> = fallback.content.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Anvil", "Bolt Cutter", "Crowbar"]);
}

#[test]
fn test_pagination_metadata_and_cap() {
    let catalog = create_test_catalog();
    let c = seed_category(&catalog, "Bulk", None);
    for i in 0..130 {
        seed_product(&catalog, &format!("Item {i:03}"), c.id, "1.00", 1);
    }

    // requested size above the cap is silently clamped
    let page = catalog
        .search_products(&ProductFilter::default(), 0, Some(1000))
        .unwrap();
    assert_eq!(page.size, 100);
    assert_eq!(page.content.len(), 100);
    assert_eq!(page.total_elements, 130);
    assert_eq!(page.total_pages, 2);
    assert!(page.has_next);
    assert!(!page.has_previous);

    let last = catalog
        .search_products(&ProductFilter::default(), 1, Some(1000))
        .unwrap();
    assert_eq!(last.content.len(), 30);
    assert!(!last.has_next);
    assert!(last.has_previous);
}

#[test]
fn test_variant_search_scoped_and_by_attribute() {
    let catalog = create_test_catalog();
    let c = seed_category(&catalog, "Shirts", None);
    let x = seed_product(&catalog, "Shirt", c.id, "19.99", 0).id;
    let y = seed_product(&catalog, "Jacket", c.id, "49.99", 0).id;

    let red = catalog.create_variant(x, &variant_payload("Red-L", 1)).unwrap();
    catalog.add_attribute(red.id, "color", "red").unwrap();
    catalog.create_variant(x, &variant_payload("Blue-M", 0)).unwrap();
    catalog.create_variant(y, &variant_payload("Red-XL", 1)).unwrap();

    let scoped = catalog
        .search_variants(Some(x), &VariantFilter::default(), 0, None)
        .unwrap();
    assert_eq!(scoped.total_elements, 2);

    let by_attr = catalog
        .search_variants(
            None,
            &VariantFilter {
                attribute: Some(("color".to_string(), "red".to_string())),
                ..Default::default()
            },
            0,
            None,
        )
        .unwrap();
    assert_eq!(by_attr.total_elements, 1);
    assert_eq!(by_attr.content[0].name, "Red-L");

    let stocked = catalog
        .search_variants(
            Some(x),
            &VariantFilter {
                in_stock: Some(true),
                ..Default::default()
            },
            0,
            None,
        )
        .unwrap();
    assert_eq!(stocked.total_elements, 1);
}
