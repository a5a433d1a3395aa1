//! Shipping address lifecycle: default-singleton invariant, validation
//! passthrough, delete-then-refetch.

use platter_client::store::{AddressBook, MutateError};
use platter_core::{FieldError, NewAddress};
use platter_integration_tests::TestContext;

fn valid_payload(alias: &str) -> NewAddress {
    NewAddress {
        alias: alias.to_owned(),
        street: "2 Side St".to_owned(),
        city: "Sevilla".to_owned(),
        province: "Sevilla".to_owned(),
        zip_code: "41002".to_owned(),
        is_default: false,
    }
}

#[tokio::test]
async fn set_default_moves_the_flag_and_refetches() {
    let ctx = TestContext::new().await;
    let home = ctx.seed_address("Home", true);
    let office = ctx.seed_address("Office", false);

    let mut book = AddressBook::open(ctx.client.clone(), ctx.session.clone());
    book.refresh().await.expect("initial fetch");
    book.set_default(office).await.expect("set default");

    // Exactly one default, and it is the one we asked for; the old
    // default lost its flag without the client ever touching it.
    let defaults: Vec<_> = book.items().iter().filter(|a| a.is_default).collect();
    assert_eq!(defaults.len(), 1);
    assert_eq!(defaults.first().map(|a| a.id), Some(office));
    assert!(!book.get(home).expect("home still listed").is_default);
}

#[tokio::test]
async fn set_default_holds_for_any_sequence_of_calls() {
    let ctx = TestContext::new().await;
    let ids = [
        ctx.seed_address("One", true),
        ctx.seed_address("Two", false),
        ctx.seed_address("Three", false),
    ];

    let mut book = AddressBook::open(ctx.client.clone(), ctx.session.clone());
    book.refresh().await.expect("initial fetch");

    for &target in &[ids[1], ids[2], ids[0], ids[2]] {
        book.set_default(target).await.expect("set default");
        let defaults: Vec<_> = book.items().iter().filter(|a| a.is_default).collect();
        assert_eq!(defaults.len(), 1, "exactly one default after each call");
        assert_eq!(defaults.first().map(|a| a.id), Some(target));
    }
}

#[tokio::test]
async fn create_surfaces_server_validation_unmodified() {
    let ctx = TestContext::new().await;
    ctx.seed_address("Home", true);

    let mut book = AddressBook::open(ctx.client.clone(), ctx.session.clone());
    book.refresh().await.expect("initial fetch");

    // Passes client-side validation; the backend rejects the duplicate
    // alias, and its `{param, msg}` pair arrives untouched.
    let err = book.create(&valid_payload("Home")).await.expect_err("duplicate alias");
    let MutateError::Mutation(api) = err else {
        panic!("expected a mutation failure, got {err:?}");
    };
    assert_eq!(
        api.validation_errors().expect("validation error"),
        [FieldError::new("alias", "Alias already exists")]
    );
    // Local state untouched by the failed write.
    assert_eq!(book.items().len(), 1);
}

#[tokio::test]
async fn create_with_missing_fields_never_reaches_the_backend() {
    let ctx = TestContext::new().await;
    let mut book = AddressBook::open(ctx.client.clone(), ctx.session.clone());
    book.refresh().await.expect("initial fetch");

    let hits_before = ctx.state().hits;
    let mut payload = valid_payload("Home");
    payload.street = String::new();
    payload.zip_code = String::new();

    let err = book.create(&payload).await.expect_err("invalid payload");
    let params: Vec<String> = err
        .validation_errors()
        .expect("field errors")
        .iter()
        .map(|e| e.param.clone())
        .collect();
    assert_eq!(params, ["street", "zipCode"]);
    assert_eq!(ctx.state().hits, hits_before, "rejected before transport");
}

#[tokio::test]
async fn delete_refetches_and_clears_the_pending_marker() {
    let ctx = TestContext::new().await;
    let home = ctx.seed_address("Home", true);
    let office = ctx.seed_address("Office", false);

    let mut book = AddressBook::open(ctx.client.clone(), ctx.session.clone());
    book.refresh().await.expect("initial fetch");

    book.mark_for_deletion(office);
    book.delete(office).await.expect("delete");

    assert_eq!(book.pending_delete(), None);
    assert_eq!(book.items().len(), 1);
    assert_eq!(book.items().first().map(|a| a.id), Some(home));
}

#[tokio::test]
async fn failed_delete_still_clears_the_pending_marker() {
    let ctx = TestContext::new().await;
    let home = ctx.seed_address("Home", true);

    let mut book = AddressBook::open(ctx.client.clone(), ctx.session.clone());
    book.refresh().await.expect("initial fetch");

    // Delete something the server no longer has.
    ctx.state().addresses.clear();
    book.mark_for_deletion(home);
    let err = book.delete(home).await.expect_err("already gone");
    assert!(matches!(err, MutateError::Mutation(_)));
    assert_eq!(book.pending_delete(), None, "marker cleared on failure too");
}

#[tokio::test]
async fn created_address_appears_after_the_reconciling_fetch() {
    let ctx = TestContext::new().await;
    let mut book = AddressBook::open(ctx.client.clone(), ctx.session.clone());
    book.refresh().await.expect("initial fetch");

    let created = book
        .create(&valid_payload("Beach house"))
        .await
        .expect("create")
        .applied()
        .expect("attached collection applies results");

    assert_eq!(book.items().len(), 1);
    assert_eq!(book.get(created.id).map(|a| a.alias.as_str()), Some("Beach house"));
}
