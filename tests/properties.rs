// Property tests for the task store and query engine

use std::collections::HashSet;

use proptest::prelude::*;
use taskboard::codec;
use taskboard::{
    Criterion, MemoryStorage, Priority, SortOrder, Status, StoreOptions, Task, TaskDraft, TaskStore, filter,
    search, sort,
};

// =============================================================================
// Strategies
// =============================================================================

fn priority() -> impl Strategy<Value = Priority> {
    prop_oneof![Just(Priority::High), Just(Priority::Medium), Just(Priority::Low)]
}

fn status() -> impl Strategy<Value = Status> {
    prop_oneof![Just(Status::InProgress), Just(Status::Completed)]
}

fn due_date() -> impl Strategy<Value = String> {
    (2020i32..2030, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| format!("{:04}-{:02}-{:02}", y, m, d))
}

fn draft() -> impl Strategy<Value = TaskDraft> {
    ("[a-zA-Z][a-zA-Z ]{0,20}", "[a-zA-Z][a-zA-Z ]{0,40}", due_date(), priority(), status()).prop_map(
        |(title, description, due_date, priority, status)| TaskDraft {
            title,
            description,
            due_date,
            priority,
            status,
        },
    )
}

/// Tasks with ids unique by position
fn task_list(max: usize) -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec(draft(), 0..max).prop_map(|drafts| {
        drafts
            .into_iter()
            .enumerate()
            .map(|(i, d)| Task::from_draft(format!("t{}", i), d))
            .collect()
    })
}

fn empty_store() -> TaskStore<MemoryStorage> {
    TaskStore::initialize_with(
        MemoryStorage::new(),
        StoreOptions {
            seed_examples: false,
            ..Default::default()
        },
    )
}

fn store_with(drafts: Vec<TaskDraft>) -> TaskStore<MemoryStorage> {
    let mut store = empty_store();
    for d in drafts {
        store.create(d).unwrap();
    }
    store
}

// =============================================================================
// Store properties
// =============================================================================

proptest! {
    #[test]
    fn created_ids_are_unique(drafts in prop::collection::vec(draft(), 1..40)) {
        let store = store_with(drafts.clone());
        let ids: HashSet<&str> = store.list().iter().map(|t| t.id.as_str()).collect();
        prop_assert_eq!(ids.len(), drafts.len());
    }

    #[test]
    fn update_replaces_exactly_one(
        drafts in prop::collection::vec(draft(), 1..20),
        pick in any::<prop::sample::Index>(),
        replacement in draft()
    ) {
        let mut store = store_with(drafts);
        let before = store.list().to_vec();
        let index = pick.index(before.len());

        let edited = Task::from_draft(before[index].id.clone(), replacement);
        store.update(edited.clone()).unwrap();

        prop_assert_eq!(store.len(), before.len());
        for (i, task) in store.list().iter().enumerate() {
            if i == index {
                prop_assert_eq!(task, &edited);
            } else {
                prop_assert_eq!(task, &before[i]);
            }
        }
    }

    #[test]
    fn delete_removes_only_target(
        drafts in prop::collection::vec(draft(), 1..20),
        pick in any::<prop::sample::Index>()
    ) {
        let mut store = store_with(drafts);
        let before = store.list().to_vec();
        let id = before[pick.index(before.len())].id.clone();

        prop_assert!(store.delete(&id).is_some());
        prop_assert!(store.list().iter().all(|t| t.id != id));
        prop_assert_eq!(store.len(), before.len() - 1);

        let after_first = store.list().to_vec();
        prop_assert!(store.delete(&id).is_none());
        prop_assert_eq!(store.list(), after_first.as_slice());
    }

    #[test]
    fn store_round_trips_through_storage(drafts in prop::collection::vec(draft(), 0..20)) {
        let store = store_with(drafts);
        let expected = store.list().to_vec();

        let reopened = TaskStore::initialize(store.into_storage());
        prop_assert_eq!(reopened.list(), expected.as_slice());
    }
}

// =============================================================================
// Query properties
// =============================================================================

proptest! {
    #[test]
    fn empty_search_is_identity(tasks in task_list(30)) {
        prop_assert_eq!(search(&tasks, ""), tasks);
    }

    #[test]
    fn search_results_contain_query(tasks in task_list(30), query in "[a-z]{1,3}") {
        let found = search(&tasks, &query);
        for task in &found {
            let hay = format!("{} {}", task.title.to_lowercase(), task.description.to_lowercase());
            prop_assert!(hay.contains(&query));
        }
        let missed = tasks.len() - found.len();
        let expected_missed = tasks
            .iter()
            .filter(|t| !t.title.to_lowercase().contains(&query) && !t.description.to_lowercase().contains(&query))
            .count();
        prop_assert_eq!(missed, expected_missed);
    }

    #[test]
    fn filter_all_all_is_identity(tasks in task_list(30)) {
        prop_assert_eq!(filter(&tasks, Criterion::All, Criterion::All), tasks);
    }

    #[test]
    fn filter_high_returns_only_high(tasks in task_list(30)) {
        let result = filter(&tasks, Criterion::Only(Priority::High), Criterion::All);
        prop_assert!(result.iter().all(|t| t.priority == Priority::High));
        prop_assert_eq!(result.len(), tasks.iter().filter(|t| t.priority == Priority::High).count());
    }

    #[test]
    fn desc_reverses_asc_without_ties(tasks in task_list(30)) {
        let mut seen = HashSet::new();
        let distinct: Vec<Task> = tasks.into_iter().filter(|t| seen.insert(t.due_date.clone())).collect();

        let mut asc = sort(&distinct, SortOrder::Asc);
        asc.reverse();
        prop_assert_eq!(sort(&distinct, SortOrder::Desc), asc);
    }

    #[test]
    fn sort_is_stable_on_ties(tasks in task_list(40), order in prop_oneof![Just(SortOrder::Asc), Just(SortOrder::Desc)]) {
        let position = |id: &str| tasks.iter().position(|t| t.id == id).unwrap();
        let sorted = sort(&tasks, order);

        for pair in sorted.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            match order {
                SortOrder::Asc => {
                    prop_assert!(a.due_on() <= b.due_on());
                }
                SortOrder::Desc => {
                    prop_assert!(a.due_on() >= b.due_on());
                }
            }
            if a.due_date == b.due_date {
                prop_assert!(position(&a.id) < position(&b.id));
            }
        }
    }

    #[test]
    fn codec_round_trip(tasks in task_list(30)) {
        let raw = codec::encode(&tasks).unwrap();
        prop_assert_eq!(codec::decode(&raw).unwrap(), tasks);
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn sort_scenario_orders_by_calendar_date() {
    let tasks: Vec<Task> = ["2025-05-12", "2025-05-20", "2025-05-15"]
        .iter()
        .enumerate()
        .map(|(i, due)| Task::from_draft(i.to_string(), TaskDraft::new("t", "d").due(*due)))
        .collect();

    let dates: Vec<String> = sort(&tasks, SortOrder::Asc).into_iter().map(|t| t.due_date).collect();
    assert_eq!(dates, vec!["2025-05-12", "2025-05-15", "2025-05-20"]);
}

#[test]
fn empty_title_is_rejected_before_reaching_store() {
    let mut store = empty_store();
    let draft = TaskDraft {
        title: "".to_string(),
        description: "x".to_string(),
        due_date: "2025-01-01".to_string(),
        priority: Priority::Low,
        status: Status::Completed,
    };

    let err = store.create(draft).unwrap_err();
    assert!(err.validation().unwrap().contains(taskboard::Field::Title));
    assert!(store.is_empty());
}
