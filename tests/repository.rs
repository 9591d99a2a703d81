use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use versment_crm::domain::client::{Client, NewClient};
use versment_crm::domain::types::{ClientId, NonEmptyString, VersmentId, VersmentType};
use versment_crm::domain::versment::Versment;
use versment_crm::repository::errors::RepositoryError;
use versment_crm::repository::{
    ClientReader, ClientWriter, DieselRepository, VersmentReader, VersmentWriter,
};

mod common;

fn add_client(repo: &DieselRepository, last: &str, first: Option<&str>) -> Client {
    let new_client = NewClient::try_new(last, first.map(str::to_string)).unwrap();
    repo.create_client(&new_client).unwrap()
}

fn versment(client_id: ClientId, amount: &str, kind: VersmentType, date: (i32, u32, u32)) -> Versment {
    Versment::new(
        client_id,
        amount.parse().unwrap(),
        kind,
        NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        NonEmptyString::new(date.0.to_string()).unwrap(),
    )
}

#[test]
fn test_client_directory_keeps_insertion_order() {
    let test_db = common::TestDb::new("test_client_directory.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    let doe = add_client(&repo, "Doe", Some("John"));
    let smith = add_client(&repo, "Smith", Some("Ann"));
    let martin = add_client(&repo, "Martin", None);

    let clients = repo.list_clients().unwrap();
    let labels: Vec<String> = clients.iter().map(Client::display_label).collect();
    assert_eq!(
        labels,
        vec![
            format!("Doe John ({})", doe.id),
            format!("Smith Ann ({})", smith.id),
            format!("Martin  ({})", martin.id),
        ]
    );

    let found = repo.get_client_by_id(smith.id).unwrap().unwrap();
    assert_eq!(found.last_name, "Smith");
    assert!(
        repo.get_client_by_id(ClientId::new(999).unwrap())
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_versment_repository_crud() {
    let test_db = common::TestDb::new("test_versment_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let client = add_client(&repo, "Doe", Some("John"));

    let draft = versment(client.id, "12.5", VersmentType::Avance, (2024, 3, 1));
    let id = repo.insert_versment(&draft).unwrap();

    let stored = repo.get_versment_by_id(id).unwrap().unwrap();
    assert_eq!(stored.id, Some(id));
    assert_eq!(stored.client_id, client.id);
    assert_eq!(stored.amount, "12.5".parse::<BigDecimal>().unwrap());
    assert_eq!(stored.kind, VersmentType::Avance);
    assert_eq!(stored.payment_date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    assert_eq!(stored.year_concerned.as_str(), "2024");
    let created_at = stored.created_at.expect("created_at is stamped on insert");

    let mut changed = stored.clone();
    changed.amount = BigDecimal::from(20);
    changed.kind = VersmentType::Remboursement;
    changed.created_at = None;
    assert!(repo.update_versment(&changed).unwrap());

    let reloaded = repo.get_versment_by_id(id).unwrap().unwrap();
    assert_eq!(reloaded.amount, BigDecimal::from(20));
    assert_eq!(reloaded.kind, VersmentType::Remboursement);
    assert_eq!(reloaded.created_at, Some(created_at));

    assert!(repo.delete_versment(id).unwrap());
    assert!(repo.get_versment_by_id(id).unwrap().is_none());
    assert!(!repo.delete_versment(id).unwrap());
}

#[test]
fn test_update_without_match_returns_false() {
    let test_db = common::TestDb::new("test_update_without_match.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let client = add_client(&repo, "Doe", None);

    let unsaved = versment(client.id, "1", VersmentType::Autre, (2024, 1, 1));
    assert!(!repo.update_versment(&unsaved).unwrap());

    let mut missing = unsaved.clone();
    missing.id = Some(VersmentId::new(404).unwrap());
    assert!(!repo.update_versment(&missing).unwrap());
}

#[test]
fn test_listing_and_totals_by_client() {
    let test_db = common::TestDb::new("test_listing_and_totals.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let doe = add_client(&repo, "Doe", Some("John"));
    let smith = add_client(&repo, "Smith", Some("Ann"));
    let idle = add_client(&repo, "Idle", None);

    for draft in [
        versment(doe.id, "0.1", VersmentType::Honoraires, (2024, 1, 10)),
        versment(doe.id, "0.2", VersmentType::Avance, (2024, 2, 10)),
        versment(doe.id, "1000.35", VersmentType::Autre, (2023, 12, 1)),
        versment(smith.id, "50", VersmentType::Honoraires, (2024, 3, 5)),
    ] {
        repo.insert_versment(&draft).unwrap();
    }

    let all = repo.list_versments().unwrap();
    assert_eq!(all.len(), 4);

    let doe_versments = repo.list_versments_by_client(doe.id).unwrap();
    let dates: Vec<String> = doe_versments
        .iter()
        .map(|v| v.payment_date.to_string())
        .collect();
    assert_eq!(dates, vec!["2024-02-10", "2024-01-10", "2023-12-01"]);

    assert_eq!(
        repo.total_versments_by_client(doe.id).unwrap(),
        "1000.65".parse::<BigDecimal>().unwrap()
    );
    assert_eq!(
        repo.total_versments_by_client(smith.id).unwrap(),
        BigDecimal::from(50)
    );
    assert_eq!(repo.total_versments_by_client(idle.id).unwrap(), BigDecimal::from(0));
    assert!(repo.list_versments_by_client(idle.id).unwrap().is_empty());
}

#[test]
fn test_versment_for_unknown_client_is_rejected() {
    let test_db = common::TestDb::new("test_unknown_client.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    let orphan = versment(ClientId::new(77).unwrap(), "5", VersmentType::Autre, (2024, 5, 5));
    let result = repo.insert_versment(&orphan);

    assert!(matches!(
        result,
        Err(RepositoryError::UnknownClient(id)) if id.get() == 77
    ));
}

#[test]
fn test_wide_amounts_round_trip_exactly() {
    let test_db = common::TestDb::new("test_wide_amounts.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let client = add_client(&repo, "Doe", None);

    let wide = "123456789012345678901234567890.50";
    let fine = "0.123456789012345678901234567891234";
    let first = repo
        .insert_versment(&versment(client.id, wide, VersmentType::Honoraires, (2024, 1, 1)))
        .unwrap();
    repo.insert_versment(&versment(client.id, fine, VersmentType::Autre, (2024, 1, 2)))
        .unwrap();

    let stored = repo.get_versment_by_id(first).unwrap().unwrap();
    assert_eq!(stored.amount, wide.parse::<BigDecimal>().unwrap());
    assert_eq!(
        repo.total_versments_by_client(client.id).unwrap(),
        "123456789012345678901234567890.623456789012345678901234567891234"
            .parse::<BigDecimal>()
            .unwrap()
    );
}
