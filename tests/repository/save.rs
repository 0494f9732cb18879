use super::*;
use std::error::Error;

/// Tests saving with nothing staged.
///
/// Expected: Ok with nothing written
#[tokio::test]
async fn saves_nothing_without_changes() -> Result<(), RepoError> {
    let mut context = setup().await;
    let mut repo = Repository::new(&mut context);

    let saved = repo.save().await?;

    assert_eq!(saved.written(), 0);

    Ok(())
}

/// Tests a save rejected by entity validation.
///
/// Verifies that the rejection surfaces as a validation error with an empty message, that the
/// field errors stay reachable through its source, and that nothing is written.
///
/// Expected: Err(Validation) with the change set left intact
#[tokio::test]
async fn rewraps_validation_failure() -> Result<(), RepoError> {
    let mut context = setup().await;
    let mut repo = Repository::new(&mut context);

    repo.create(new_customer("Valid", "valid@example.com"), None);
    repo.create(new_customer("   ", "not-an-email"), None);

    let err = match repo.save().await {
        Err(RepoError::Validation(err)) => err,
        other => panic!("expected validation error, got {:?}", other),
    };

    assert_eq!(err.to_string(), "");
    assert!(err.source().is_some());

    let source = err.source_error();
    assert_eq!(source.entity_validation_errors.len(), 1);
    assert_eq!(source.entity_validation_errors[0].entity, "customer");

    let fields: Vec<_> = source.field_errors().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["name", "email"]);

    assert!(repo.has_changes());
    assert_eq!(repo.get_count::<Customer>(None).await?, 0);

    Ok(())
}

/// Tests validation of staged updates.
///
/// Expected: Err(Validation) naming the rejected product
#[tokio::test]
async fn validates_staged_updates() -> Result<(), RepoError> {
    let mut context = setup().await;
    let existing = factory::create_product(context.connection()).await?;

    let mut repo = Repository::new(&mut context);
    let mut model = existing.clone().into_active_model();
    model.price_cents = ActiveValue::Set(-1);
    repo.update(model, None);

    let result = repo.save().await;

    match result {
        Err(RepoError::Validation(err)) => {
            let rejected = &err.source_error().entity_validation_errors[0];
            assert_eq!(rejected.entity, "product");
            assert_eq!(rejected.id, Some(existing.id));
        }
        other => panic!("expected validation error, got {:?}", other),
    }

    let stored = repo.get_by_id::<Product>(existing.id).await?.unwrap();
    assert_eq!(stored.price_cents, existing.price_cents);

    Ok(())
}

/// Tests that deletes are not validated.
///
/// Expected: Ok with an invalid row removed
#[tokio::test]
async fn skips_validation_for_deletes() -> Result<(), RepoError> {
    let mut context = setup().await;
    let invalid = factory::customer::CustomerFactory::new(context.connection())
        .email("no-at-sign")
        .build()
        .await?;

    let mut repo = Repository::new(&mut context);
    repo.delete(invalid.clone().into_active_model())?;
    repo.save().await?;

    assert!(repo.get_by_id::<Customer>(invalid.id).await?.is_none());

    Ok(())
}

/// Tests that a store failure rolls back every staged change.
///
/// Verifies atomicity: a unique violation on the second insert leaves the first unwritten,
/// and the failure is returned unchanged.
///
/// Expected: Err(DbErr) with no customer or product written
#[tokio::test]
async fn rolls_back_on_store_failure() -> Result<(), RepoError> {
    let mut context = setup().await;
    let existing = factory::product::ProductFactory::new(context.connection())
        .sku("SKU-TAKEN")
        .build()
        .await?;

    let mut repo = Repository::new(&mut context);
    repo.create(new_customer("Rolled", "rolled@example.com"), None);
    repo.create(
        product::ActiveModel {
            sku: ActiveValue::Set("SKU-TAKEN".to_string()),
            name: ActiveValue::Set("Duplicate".to_string()),
            price_cents: ActiveValue::Set(1),
            ..Default::default()
        },
        None,
    );

    let result = repo.save().await;

    assert!(matches!(result, Err(RepoError::DbErr(_))));
    assert!(repo.has_changes());
    assert_eq!(repo.get_count::<Customer>(None).await?, 0);
    assert_eq!(
        repo.get_count::<Product>(Some(
            Condition::all().add(product::Column::Sku.eq("SKU-TAKEN"))
        ))
        .await?,
        1
    );
    assert!(repo.get_by_id::<Product>(existing.id).await?.is_some());

    Ok(())
}

/// Tests discarding a change set after a failed save.
///
/// Expected: Ok with the context usable again once its changes are dropped
#[tokio::test]
async fn discards_changes_after_failure() -> Result<(), RepoError> {
    let mut context = setup().await;

    {
        let mut repo = Repository::new(&mut context);
        let mut invalid = new_customer("", "bad");
        invalid.id = ActiveValue::Set(1);
        repo.create(invalid, None);
        assert!(repo.save().await.is_err());
    }

    assert!(context.has_changes());
    assert_eq!(context.entry_state::<Customer>(1), EntityState::Added);
    context.discard_changes();
    assert!(!context.has_changes());
    assert_eq!(context.entry_state::<Customer>(1), EntityState::Detached);

    let mut repo = Repository::new(&mut context);
    let entry = repo.create(new_customer("Fresh", "fresh@example.com"), None);
    let saved = repo.save().await?;

    assert!(saved.id_of(entry).is_some());

    Ok(())
}

/// Tests one unit of work spanning several tables and operations.
///
/// Expected: Ok with every staged change applied by a single save
#[tokio::test]
async fn applies_mixed_changes_together() -> Result<(), RepoError> {
    let mut context = setup().await;
    let to_update = factory::create_customer(context.connection()).await?;
    let to_delete = factory::create_product(context.connection()).await?;

    let mut repo = Repository::new(&mut context);

    let inserted = repo.create(
        product::ActiveModel {
            sku: ActiveValue::Set("SKU-NEW".to_string()),
            name: ActiveValue::Set("New".to_string()),
            price_cents: ActiveValue::Set(500),
            ..Default::default()
        },
        Some("alice"),
    );

    let mut model = to_update.clone().into_active_model();
    model.email = ActiveValue::Set("changed@example.com".to_string());
    repo.update(model, Some("alice"));

    repo.delete_by_id::<Product>(to_delete.id).await?;

    let saved = repo.save().await?;

    assert_eq!(saved.written(), 3);
    assert!(repo
        .get_by_id::<Product>(saved.id_of(inserted).unwrap())
        .await?
        .is_some());
    assert!(repo.get_by_id::<Product>(to_delete.id).await?.is_none());
    assert_eq!(
        repo.get_by_id::<Customer>(to_update.id)
            .await?
            .map(|c| c.email),
        Some("changed@example.com".to_string())
    );

    Ok(())
}
