use pamphlet_schema::*;
use pamphlet_storage::*;
use std::fs;
use tempfile::TempDir;

fn project(id: &str, created_at: i64) -> Project {
    Project {
        id: id.to_string(),
        title: format!("Project {}", id),
        template: TemplateType::Invitation,
        password: Some("1234".to_string()),
        blocks: initial_blocks(TemplateType::Invitation),
        created_at,
        theme_color: DEFAULT_THEME_COLOR.to_string(),
    }
}

#[test]
fn test_missing_file_is_empty_store() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path().join("projects.json"));

    assert!(store.list().unwrap().is_empty());
    assert!(store.get("nope").unwrap().is_none());
}

#[test]
fn test_put_creates_parent_dirs_and_persists() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".pamphlet").join("projects.json");
    let store = JsonFileStore::new(&path);

    store.put(&project("1", 1)).unwrap();
    store.put(&project("2", 2)).unwrap();

    let reopened = JsonFileStore::new(&path);
    let loaded = reopened.get("1").unwrap().unwrap();
    assert_eq!(loaded, project("1", 1));
    assert_eq!(reopened.list().unwrap().len(), 2);
}

#[test]
fn test_file_is_a_json_array_of_projects() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("projects.json");
    let store = JsonFileStore::new(&path);
    store.put(&project("1", 1)).unwrap();

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let first = &raw.as_array().unwrap()[0];
    assert_eq!(first["type"], "INVITATION");
    assert_eq!(first["createdAt"], 1);
    assert_eq!(first["blocks"][0]["type"], "HEADER");
}

#[test]
fn test_upsert_and_delete() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path().join("projects.json"));
    store.put(&project("1", 1)).unwrap();

    let mut edited = project("1", 1);
    edited.blocks.pop();
    store.put(&edited).unwrap();

    assert_eq!(store.list().unwrap().len(), 1);
    assert_eq!(store.get("1").unwrap().unwrap().blocks.len(), 3);

    assert!(store.delete("1").unwrap());
    assert!(!store.delete("1").unwrap());
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn test_corrupt_file_reports_serialization_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("projects.json");
    fs::write(&path, "{ not json").unwrap();

    let store = JsonFileStore::new(&path);
    assert!(matches!(store.list(), Err(StorageError::Serialization(_))));
}

#[test]
fn test_one_bad_record_does_not_poison_the_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("projects.json");

    let good = serde_json::to_value(project("1", 1)).unwrap();
    let bad_template = serde_json::json!({
        "id": "2", "title": "bad", "type": "POSTER", "blocks": [], "createdAt": 2
    });
    let mut odd_form = serde_json::to_value(project("4", 4)).unwrap();
    odd_form["blocks"][3]["content"]["fields"][0]["type"] = "number".into();
    fs::write(&path, serde_json::to_string(&vec![good, bad_template.clone(), odd_form]).unwrap()).unwrap();

    let store = JsonFileStore::new(&path);
    let ids: Vec<String> = store.list().unwrap().into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec!["1", "4"]);
    assert_eq!(store.get("1").unwrap().unwrap(), project("1", 1));

    let odd = store.get("4").unwrap().unwrap();
    assert_eq!(odd.blocks.len(), 4);
    assert_eq!(odd.blocks[3].block_type(), None);
    assert_eq!(odd.blocks[3].content.type_name(), "FORM");

    store.put(&project("3", 3)).unwrap();
    assert_eq!(store.list().unwrap().len(), 3);

    let raw: Vec<serde_json::Value> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert!(raw.contains(&bad_template));
    let rewritten = raw.iter().find(|v| v["id"] == "4").unwrap();
    assert_eq!(rewritten["blocks"][3]["content"]["fields"][0]["type"], "number");

    assert!(store.delete("2").unwrap());
    let raw: Vec<serde_json::Value> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw.len(), 3);
    assert!(!raw.contains(&bad_template));
}
