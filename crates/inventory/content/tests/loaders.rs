use std::fs;
use std::path::PathBuf;

use inventory_content::{ConfigLoader, ContentFactory, SchemaCatalogError, SchemaLoader};
use inventory_core::{
    Capabilities, DefinitionId, InventorySimulator, Item, ItemCategory, ItemData, ItemId,
    Response, StatTrakTransferRule, StaticData, UseToolRequest,
};
use tempfile::TempDir;

fn bundled_data() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

fn write_data_dir(config: &str, items: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), config).unwrap();
    fs::write(dir.path().join("items.ron"), items).unwrap();
    dir
}

#[test]
fn bundled_content_loads() {
    let factory = ContentFactory::new(bundled_data());

    let config = factory.load_config().unwrap();
    assert_eq!(config.seed, 20240101);

    let catalog = factory.load_catalog().unwrap();
    let rifle = catalog.lookup(DefinitionId(7)).unwrap();
    assert_eq!(rifle.category, ItemCategory::Skin);
    assert!(rifle.is_nameable());
    assert!(rifle.capabilities.contains(Capabilities::STICKERS));
    assert_eq!(rifle.sticker_slots, 5);

    let case = catalog.lookup(DefinitionId(4001)).unwrap();
    let container = case.container.as_ref().unwrap();
    assert_eq!(container.key, Some(DefinitionId(4002)));
    assert_eq!(container.total_weight(), 100);

    let capsule = catalog.lookup(DefinitionId(4003)).unwrap();
    assert_eq!(capsule.container.as_ref().unwrap().key, None);

    assert_eq!(
        catalog.lookup(DefinitionId(1324)).unwrap().stat_trak_transfer,
        Some(StatTrakTransferRule::Sum)
    );
    assert_eq!(
        catalog.lookup(DefinitionId(4701)).unwrap().pass_reward,
        Some(DefinitionId(4702))
    );
}

#[test]
fn bundled_case_opens_through_simulator() {
    let factory = ContentFactory::new(bundled_data());
    let catalog = factory.load_catalog().unwrap();
    let mut sim = InventorySimulator::with_config(factory.load_config().unwrap());

    let case = sim.add_item(Item::new(DefinitionId(4001), ItemData::Case));
    let key = sim.add_item(Item::new(DefinitionId(4002), ItemData::Key));
    sim.assign_item_id(case, ItemId(1));
    sim.assign_item_id(key, ItemId(2));
    sim.drain_responses();

    sim.use_tool(&UseToolRequest::use_tool(ItemId(2)).on(ItemId(1)), &catalog);

    let responses = sim.drain_responses();
    let [Response::ContainerOpened { received, .. }] = responses.as_slice() else {
        panic!("unexpected responses {responses:?}");
    };
    let dropped = sim.item(*received).unwrap();
    assert!(matches!(
        dropped.data,
        ItemData::Skin(_) | ItemData::Gloves(_)
    ));
    assert_eq!(sim.items().count(), 1);
}

#[test]
fn missing_keys_use_defaults() {
    let dir = write_data_dir("seed = 5\n", "(items: [])");
    let factory = ContentFactory::new(dir.path());

    let config = factory.load_config().unwrap();
    assert_eq!(config.seed, 5);
    assert_eq!(config.max_name_tag_length, 20);
    assert!(factory.load_schema().unwrap().is_empty());
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let err = ConfigLoader::load(&path).unwrap_err();
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn malformed_schema_is_an_error() {
    let dir = write_data_dir("", "(items: [(definition: 1)])");
    let err = SchemaLoader::load(&dir.path().join("items.ron")).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to parse item schema RON"));
}

#[test]
fn duplicate_definitions_are_rejected() {
    let items = r#"(
        items: [
            (definition: 3, category: Sticker),
            (definition: 3, category: Patch),
        ],
    )"#;
    let dir = write_data_dir("", items);

    let err = ContentFactory::new(dir.path()).load_catalog().unwrap_err();
    assert_eq!(
        err.downcast_ref::<SchemaCatalogError>(),
        Some(&SchemaCatalogError::DuplicateDefinition(DefinitionId(3)))
    );
}
