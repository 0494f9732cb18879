use super::*;

/// Tests updating an entity loaded through the repository.
///
/// Verifies that the change is written, modified_* is stamped and created_* is preserved.
///
/// Expected: Ok with the new name and modification stamp persisted
#[tokio::test]
async fn updates_loaded_entity() -> Result<(), RepoError> {
    let mut context = setup().await;
    let existing = factory::customer::CustomerFactory::new(context.connection())
        .name("Before")
        .created_by(Some("alice"))
        .build()
        .await?;

    let mut repo = Repository::new(&mut context);
    let loaded = repo.get_by_id::<Customer>(existing.id).await?.unwrap();

    let mut model = loaded.into_active_model();
    model.name = ActiveValue::Set("After".to_string());
    repo.update(model, Some("bob"));

    assert_eq!(repo.state_of::<Customer>(existing.id), EntityState::Modified);
    repo.save().await?;

    let customer = repo.get_by_id::<Customer>(existing.id).await?.unwrap();
    assert_eq!(customer.name, "After");
    assert_eq!(customer.modified_by, Some("bob".to_string()));
    assert!(customer.modified_date.is_some());
    assert_eq!(customer.created_by, Some("alice".to_string()));
    assert_eq!(customer.created_date, existing.created_date);

    Ok(())
}

/// Tests updating an entity never loaded through this context.
///
/// Verifies that a model built from scratch with an existing identifier replaces the row.
///
/// Expected: Ok with every column overwritten
#[tokio::test]
async fn updates_detached_entity() -> Result<(), RepoError> {
    let mut context = setup().await;
    let existing = factory::create_product(context.connection()).await?;

    let detached = product::Model {
        id: existing.id,
        sku: "SKU-REPLACED".to_string(),
        name: "Replaced".to_string(),
        price_cents: 42,
        created_by: existing.created_by.clone(),
        created_date: existing.created_date,
        modified_by: None,
        modified_date: None,
    };

    let mut repo = Repository::new(&mut context);
    repo.update(detached.into_active_model(), None);
    repo.save().await?;

    let product = repo.get_by_id::<Product>(existing.id).await?.unwrap();
    assert_eq!(product.sku, "SKU-REPLACED");
    assert_eq!(product.price_cents, 42);
    assert!(product.modified_by.is_none());
    assert!(product.modified_date.is_some());

    Ok(())
}

/// Tests updating the same entity twice before saving.
///
/// Verifies that the change set keeps one entry and the latest state wins.
///
/// Expected: Ok with one write carrying the second name
#[tokio::test]
async fn keeps_latest_state_for_repeated_update() -> Result<(), RepoError> {
    let mut context = setup().await;
    let existing = factory::create_customer(context.connection()).await?;

    let mut repo = Repository::new(&mut context);

    let mut first = existing.clone().into_active_model();
    first.name = ActiveValue::Set("First".to_string());
    let first_entry = repo.update(first, None);

    let mut second = existing.clone().into_active_model();
    second.name = ActiveValue::Set("Second".to_string());
    let second_entry = repo.update(second, None);

    assert_eq!(first_entry, second_entry);

    let saved = repo.save().await?;
    assert_eq!(saved.written(), 1);

    let customer = repo.get_by_id::<Customer>(existing.id).await?.unwrap();
    assert_eq!(customer.name, "Second");

    Ok(())
}

/// Tests updating a row that does not exist.
///
/// Verifies that the store failure surfaces unchanged and the change set is kept.
///
/// Expected: Err(DbErr) with the update still staged
#[tokio::test]
async fn fails_for_missing_row() -> Result<(), RepoError> {
    let mut context = setup().await;
    let mut repo = Repository::new(&mut context);

    let ghost = customer::Model {
        id: 404,
        name: "Ghost".to_string(),
        email: "ghost@example.com".to_string(),
        created_by: None,
        created_date: Utc::now(),
        modified_by: None,
        modified_date: None,
    };
    repo.update(ghost.into_active_model(), None);

    let result = repo.save().await;

    assert!(matches!(result, Err(RepoError::DbErr(_))));
    assert!(repo.has_changes());
    assert_eq!(repo.state_of::<Customer>(404), EntityState::Modified);

    Ok(())
}

/// Tests that an update never rewrites the creation audit columns.
///
/// Verifies that a detached model carrying different created_* values leaves the stored
/// created_by and created_date untouched while every other field is written.
///
/// Expected: Ok with created_* as first saved and the new name persisted
#[tokio::test]
async fn preserves_creation_audit_values() -> Result<(), RepoError> {
    let mut context = setup().await;
    let existing = factory::customer::CustomerFactory::new(context.connection())
        .created_by(Some("alice"))
        .build()
        .await?;

    let tampered = customer::Model {
        id: existing.id,
        name: "Renamed".to_string(),
        email: existing.email.clone(),
        created_by: Some("mallory".to_string()),
        created_date: Utc::now() - Duration::days(3650),
        modified_by: None,
        modified_date: None,
    };

    let mut repo = Repository::new(&mut context);
    repo.update(tampered.into_active_model(), Some("mallory"));
    repo.save().await?;

    let customer = repo.get_by_id::<Customer>(existing.id).await?.unwrap();
    assert_eq!(customer.name, "Renamed");
    assert_eq!(customer.created_by, Some("alice".to_string()));
    assert_eq!(customer.created_date, existing.created_date);
    assert_eq!(customer.modified_by, Some("mallory".to_string()));

    Ok(())
}

/// Tests updating an entity still staged for insertion.
///
/// Verifies that the pending insert stays an insert carrying the updated values and its
/// creation stamp, instead of turning into an update of a row that does not exist.
///
/// Expected: Ok with one inserted row holding the updated name and original created_by
#[tokio::test]
async fn updates_pending_insert_in_place() -> Result<(), RepoError> {
    let mut context = setup().await;
    let mut repo = Repository::new(&mut context);

    let mut model = new_customer("Draft", "draft@example.com");
    model.id = ActiveValue::Set(77);
    let created = repo.create(model.clone(), Some("alice"));

    model.name = ActiveValue::Set("Final".to_string());
    let updated = repo.update(model, Some("bob"));

    assert_eq!(created, updated);
    assert_eq!(repo.state_of::<Customer>(77), EntityState::Added);

    let saved = repo.save().await?;
    assert_eq!(saved.written(), 1);
    assert_eq!(saved.id_of(created), Some(77));

    let customer = repo.get_by_id::<Customer>(77).await?.unwrap();
    assert_eq!(customer.name, "Final");
    assert_eq!(customer.created_by, Some("alice".to_string()));

    Ok(())
}
