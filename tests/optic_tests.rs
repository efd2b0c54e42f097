//! Unit tests for the optic constructors, the composition algebra, and the
//! indexing combinators.
//!
//! Tests cover:
//! - Variant totality (lens / prism / optional / traversal)
//! - Flavor joining, explicit lifts, and the composition-time error
//! - Product (`zip`) and sum (`or_else`) composition
//! - `key`, `at`, `elements`, `filter_by`
//! - The `fallback` combinator

use std::collections::HashMap;

use focal::effect::{Eval, Flavor};
use focal::failure::Failure;
use focal::optics::{Optic, at, elements, filter_by, key};
use rstest::rstest;

// =============================================================================
// Test data types
// =============================================================================

#[derive(Clone, PartialEq, Debug)]
struct Account {
    owner: String,
    balance: i64,
}

#[derive(Clone, PartialEq, Debug)]
enum Payment {
    Cash(i64),
    Card { number: String, amount: i64 },
}

fn balance_lens() -> Optic<Account, i64> {
    Optic::lens(
        |account: &Account| account.balance,
        |balance, account: &Account| Account {
            balance,
            ..account.clone()
        },
    )
}

fn cash_prism() -> Optic<Payment, i64> {
    Optic::prism(
        |payment: &Payment| match payment {
            Payment::Cash(amount) => Ok(*amount),
            Payment::Card { .. } => Err(Failure::case_mismatch()),
        },
        Payment::Cash,
    )
}

fn card_amount() -> Optic<Payment, i64> {
    Optic::optional(
        |payment: &Payment| match payment {
            Payment::Card { amount, .. } => Ok(*amount),
            Payment::Cash(_) => Err(Failure::case_mismatch()),
        },
        |amount, payment: &Payment| match payment {
            Payment::Card { number, .. } => Ok(Payment::Card {
                number: number.clone(),
                amount,
            }),
            Payment::Cash(_) => Err(Failure::case_mismatch()),
        },
    )
}

fn alice() -> Account {
    Account {
        owner: "alice".to_string(),
        balance: 100,
    }
}

// =============================================================================
// Variant totality
// =============================================================================

#[rstest]
fn lens_never_fails() {
    let lens = balance_lens();
    assert_eq!(lens.get(&alice()), Ok(100));
    let updated = lens.set(250, &alice()).unwrap();
    assert_eq!(updated.balance, 250);
    assert_eq!(updated.owner, "alice");
}

#[rstest]
#[case(Payment::Cash(10), Ok(10))]
#[case(Payment::Card { number: "4111".to_string(), amount: 25 }, Err(Failure::case_mismatch()))]
fn prism_get_is_partial(#[case] payment: Payment, #[case] expected: Result<i64, Failure>) {
    assert_eq!(cash_prism().get(&payment), expected);
}

#[rstest]
fn prism_set_discards_prior_whole() {
    let card = Payment::Card {
        number: "4111".to_string(),
        amount: 25,
    };
    assert_eq!(cash_prism().set(7, &card), Ok(Payment::Cash(7)));
}

#[rstest]
fn optional_set_is_partial() {
    assert_eq!(
        card_amount().set(1, &Payment::Cash(5)),
        Err(Failure::case_mismatch())
    );
    let card = Payment::Card {
        number: "4111".to_string(),
        amount: 25,
    };
    assert_eq!(
        card_amount().set(30, &card),
        Ok(Payment::Card {
            number: "4111".to_string(),
            amount: 30
        })
    );
}

#[rstest]
fn update_short_circuits_without_touching_set() {
    let result = cash_prism().update(&Payment::Card {
        number: "4111".to_string(),
        amount: 25,
    }, |amount| amount + 1);
    assert_eq!(result, Err(Failure::case_mismatch()));
}

#[rstest]
fn update_eval_failure_carries_cause() {
    let result = balance_lens().update_eval(&alice(), |_| Eval::raise(Failure::new("ledger offline")));
    let failure = result.unwrap_err();
    assert_eq!(failure.message(), "effectful update failed");
    assert_eq!(format!("{}", failure.cause().unwrap()), "ledger offline");
}

// =============================================================================
// Flavors
// =============================================================================

#[rstest]
#[case(Flavor::Pure, Flavor::Pure, Some(Flavor::Pure))]
#[case(Flavor::Pure, Flavor::Fallible, Some(Flavor::Fallible))]
#[case(Flavor::Fallible, Flavor::Async, Some(Flavor::Async))]
#[case(Flavor::Transactional, Flavor::Transactional, Some(Flavor::Transactional))]
#[case(Flavor::Transactional, Flavor::Fallible, None)]
#[case(Flavor::Async, Flavor::Transactional, None)]
fn flavor_join_lattice(
    #[case] left: Flavor,
    #[case] right: Flavor,
    #[case] expected: Option<Flavor>,
) {
    assert_eq!(left.join(right).ok(), expected);
}

#[rstest]
fn composing_transactional_with_fallible_is_a_construction_error() {
    let accounts = Optic::lens(
        |accounts: &Vec<Account>| accounts.clone(),
        |accounts, _: &Vec<Account>| accounts,
    )
    .transactional();
    let failure = accounts.compose(&at::<Account>(0)).unwrap_err();
    assert_eq!(
        failure.message(),
        "composition type error: cannot combine transactional optic with fallible optic"
    );
}

#[rstest]
fn explicit_lift_makes_transactional_composable() {
    let accounts = Optic::lens(
        |accounts: &Vec<Account>| accounts.clone(),
        |accounts, _: &Vec<Account>| accounts,
    )
    .transactional();
    let first = at::<Account>(0).transactional();
    let composed = accounts.compose(&first).unwrap();
    assert_eq!(composed.flavor(), Flavor::Transactional);
}

#[rstest]
fn async_flavor_is_contagious() {
    let composed = balance_lens()
        .asynchronous()
        .compose(&Optic::<i64, i64>::identity())
        .unwrap();
    assert_eq!(composed.flavor(), Flavor::Async);
}

// =============================================================================
// Product and sum composition
// =============================================================================

#[rstest]
fn zip_updates_both_parts_in_one_set() {
    let owner = Optic::lens(
        |account: &Account| account.owner.clone(),
        |owner, account: &Account| Account {
            owner,
            ..account.clone()
        },
    );
    let both = owner.zip(&balance_lens()).unwrap();

    assert_eq!(both.get(&alice()), Ok(("alice".to_string(), 100)));
    let updated = both.set(("bob".to_string(), 5), &alice()).unwrap();
    assert_eq!(
        updated,
        Account {
            owner: "bob".to_string(),
            balance: 5
        }
    );
}

#[rstest]
fn or_else_merges_cases_into_common_focus() {
    let amount = cash_prism().or_else(&card_amount()).unwrap();
    assert_eq!(amount.get(&Payment::Cash(10)), Ok(10));
    assert_eq!(
        amount.get(&Payment::Card {
            number: "4111".to_string(),
            amount: 25
        }),
        Ok(25)
    );
}

#[rstest]
fn or_else_returns_second_branch_failure() {
    let first: Optic<i32, i32> = Optic::optional(
        |_: &i32| Err(Failure::new("first missed")),
        |_, _: &i32| Err(Failure::new("first rejected")),
    );
    let second: Optic<i32, i32> = Optic::optional(
        |_: &i32| Err(Failure::new("second missed")),
        |_, _: &i32| Err(Failure::new("second rejected")),
    );
    let merged = first.or_else(&second).unwrap();
    assert_eq!(merged.get(&0), Err(Failure::new("second missed")));
    assert_eq!(merged.set(1, &0), Err(Failure::new("second rejected")));
}

// =============================================================================
// Indexing combinators
// =============================================================================

fn stars() -> HashMap<String, i32> {
    let mut map = HashMap::new();
    map.insert("rust".to_string(), 3);
    map.insert("go".to_string(), 1);
    map
}

#[rstest]
fn key_reads_and_inserts() {
    let rust = key::<String, i32>("rust".to_string());
    assert_eq!(rust.get(&stars()), Ok(3));

    let python = key::<String, i32>("python".to_string());
    let inserted = python.set(1, &stars()).unwrap();
    assert_eq!(inserted["python"], 1);
}

#[rstest]
fn key_absence_message_names_the_key() {
    let python = key::<String, i32>("python".to_string());
    let failure = python.get(&stars()).unwrap_err();
    assert_eq!(failure.message(), "key not found: python");
}

#[rstest]
#[case(0, Ok(10))]
#[case(2, Ok(30))]
#[case(3, Err(Failure::index_out_of_bounds(3, 3)))]
fn at_respects_bounds(#[case] index: usize, #[case] expected: Result<i32, Failure>) {
    assert_eq!(at::<i32>(index).get(&vec![10, 20, 30]), expected);
}

#[rstest]
fn key_composes_under_a_lens() {
    #[derive(Clone, PartialEq, Debug)]
    struct Profile {
        stars: HashMap<String, i32>,
    }

    let stars_lens = Optic::lens(
        |profile: &Profile| profile.stars.clone(),
        |stars, _: &Profile| Profile { stars },
    );
    let rust = stars_lens
        .compose(&key::<String, i32>("rust".to_string()))
        .unwrap();

    let profile = Profile { stars: stars() };
    let updated = rust.update(&profile, |count| count + 1).unwrap();
    assert_eq!(updated.stars["rust"], 4);

    // The leaf failure message survives composition unchanged.
    let missing = Optic::lens(
        |profile: &Profile| profile.stars.clone(),
        |stars, _: &Profile| Profile { stars },
    )
    .compose(&key::<String, i32>("python".to_string()))
    .unwrap();
    assert_eq!(
        missing.get(&profile).unwrap_err().message(),
        "key not found: python"
    );
}

#[rstest]
fn elements_updates_every_entry() {
    let doubled = elements::<i32>()
        .update(&vec![1, 2, 3], |values| {
            values.into_iter().map(|value| value * 2).collect()
        })
        .unwrap();
    assert_eq!(doubled, vec![2, 4, 6]);
}

#[rstest]
fn filter_by_replaces_positionally() {
    let evens = filter_by(|value: &i32| value % 2 == 0);
    assert_eq!(
        evens.set(vec![100, 200], &vec![1, 2, 3, 4]),
        Ok(vec![1, 100, 3, 200])
    );
}

// =============================================================================
// fallback
// =============================================================================

#[rstest]
fn fallback_is_the_only_default_substitution() {
    let python = key::<String, i32>("python".to_string());
    assert!(python.get(&stars()).is_err());
    assert_eq!(python.fallback(0).get(&stars()), Ok(0));
    // A present focus is never replaced by the default.
    let rust = key::<String, i32>("rust".to_string()).fallback(0);
    assert_eq!(rust.get(&stars()), Ok(3));
}
