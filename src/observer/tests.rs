use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::{IndexedObserverList, Observer, Subject};
use crate::utils::error::Error;

struct Recorder {
    label: &'static str,
    seen: Seen,
}

impl Observer<u32> for Recorder {
    fn update(&self, context: &u32) {
        self.seen.lock().unwrap().push((self.label, *context));
    }

    fn name(&self) -> &str {
        self.label
    }
}

struct Faulty;

impl Observer<u32> for Faulty {
    fn update(&self, _: &u32) {
        panic!("observer down");
    }

    fn name(&self) -> &str {
        "faulty"
    }
}

type Seen = Arc<Mutex<Vec<(&'static str, u32)>>>;

fn recorder(label: &'static str, seen: &Seen) -> Arc<dyn Observer<u32>> {
    Arc::new(Recorder {
        label,
        seen: Arc::clone(seen),
    })
}

fn counter(hits: &Arc<AtomicUsize>) -> Arc<dyn Observer<u32>> {
    let hits = Arc::clone(hits);
    Arc::new(move |_: &u32| {
        hits.fetch_add(1, Ordering::SeqCst);
    })
}

#[test]
fn list_positional_operations() {
    let mut list: IndexedObserverList<str> = IndexedObserverList::new();
    let o1: Arc<str> = Arc::from("o1");
    let o2: Arc<str> = Arc::from("o2");

    assert_eq!(list.add(Arc::clone(&o1)), 1);
    assert_eq!(list.add(Arc::clone(&o2)), 2);
    assert_eq!(list.index_of(&o2, 0), Some(1));

    assert!(list.remove_at(0).is_ok());
    assert_eq!(list.count(), 1);
    assert!(Arc::ptr_eq(list.get(0).unwrap(), &o2));
}

#[test]
fn list_get_out_of_range_is_none() {
    let mut list: IndexedObserverList<str> = IndexedObserverList::default();
    assert!(list.get(0).is_none());
    list.add(Arc::from("only"));
    assert!(list.get(1).is_none());
}

#[test]
fn index_of_matches_identity_not_value() {
    let mut list: IndexedObserverList<str> = IndexedObserverList::new();
    let a: Arc<str> = Arc::from("same");
    let b: Arc<str> = Arc::from("same");
    list.add(Arc::clone(&a));

    assert_eq!(list.index_of(&a, 0), Some(0));
    assert_eq!(list.index_of(&b, 0), None);
}

#[test]
fn index_of_honours_start_index() {
    let mut list: IndexedObserverList<str> = IndexedObserverList::new();
    let a: Arc<str> = Arc::from("a");
    let b: Arc<str> = Arc::from("b");
    list.add(Arc::clone(&a));
    list.add(Arc::clone(&b));
    list.add(Arc::clone(&a));

    assert_eq!(list.index_of(&a, 0), Some(0));
    assert_eq!(list.index_of(&a, 1), Some(2));
    assert_eq!(list.index_of(&b, 2), None);
    assert_eq!(list.index_of(&a, 10), None);
}

#[test]
fn remove_at_out_of_bounds_leaves_list_untouched() {
    let mut list: IndexedObserverList<str> = IndexedObserverList::new();
    list.add(Arc::from("a"));

    let err = list.remove_at(1).unwrap_err();
    assert!(matches!(err, Error::OutOfBounds { index: 1, len: 1 }));
    assert_eq!(list.count(), 1);
}

#[test]
fn remove_at_shifts_later_entries_down() {
    let mut list: IndexedObserverList<str> = IndexedObserverList::new();
    let entries: Vec<Arc<str>> = ["a", "b", "c"].into_iter().map(Arc::<str>::from).collect();
    for e in &entries {
        list.add(Arc::clone(e));
    }

    let removed = list.remove_at(1).unwrap();
    assert!(Arc::ptr_eq(&removed, &entries[1]));
    assert!(Arc::ptr_eq(list.get(1).unwrap(), &entries[2]));
}

#[test]
fn subject_notifies_observers_in_order() {
    let seen: Seen = Arc::default();
    let subject = Subject::new();
    assert_eq!(subject.add_observer(recorder("first", &seen)), 1);
    assert_eq!(subject.add_observer(recorder("second", &seen)), 2);

    let report = subject.notify(&7);

    assert_eq!(report.notified, 2);
    assert!(report.failures.is_empty());
    assert_eq!(*seen.lock().unwrap(), vec![("first", 7), ("second", 7)]);
}

#[test]
fn closures_are_observers() {
    let hits = Arc::new(AtomicUsize::new(0));
    let subject = Subject::new();
    subject.add_observer(counter(&hits));

    subject.notify(&1);
    subject.notify(&2);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[test]
fn duplicate_observer_is_notified_per_addition() {
    let hits = Arc::new(AtomicUsize::new(0));
    let subject = Subject::new();
    let observer = counter(&hits);
    subject.add_observer(Arc::clone(&observer));
    subject.add_observer(Arc::clone(&observer));

    assert_eq!(subject.notify(&0).notified, 2);
    assert_eq!(hits.load(Ordering::SeqCst), 2);

    // one removal drops one occurrence
    assert!(subject.remove_observer(&observer));
    assert_eq!(subject.count(), 1);
}

#[test]
fn remove_observer_stops_notifications() {
    let seen: Seen = Arc::default();
    let subject = Subject::new();
    let first = recorder("first", &seen);
    subject.add_observer(Arc::clone(&first));
    subject.add_observer(recorder("second", &seen));

    assert!(subject.remove_observer(&first));
    subject.notify(&3);
    assert_eq!(*seen.lock().unwrap(), vec![("second", 3)]);
}

#[test]
fn remove_observer_never_added_is_a_noop() {
    let seen: Seen = Arc::default();
    let subject = Subject::new();
    subject.add_observer(recorder("member", &seen));
    let stranger = recorder("stranger", &seen);

    assert!(!subject.remove_observer(&stranger));
    assert_eq!(subject.count(), 1);
    subject.notify(&1);
    assert_eq!(*seen.lock().unwrap(), vec![("member", 1)]);
}

#[test]
fn remove_observer_on_empty_subject_is_a_noop() {
    let hits = Arc::new(AtomicUsize::new(0));
    let subject: Subject<u32> = Subject::default();
    assert!(!subject.remove_observer(&counter(&hits)));
    assert_eq!(subject.count(), 0);
}

#[test]
fn panicking_observer_is_isolated_and_reported() {
    let seen: Seen = Arc::default();
    let subject = Subject::new();
    subject.add_observer(Arc::new(Faulty));
    subject.add_observer(recorder("survivor", &seen));

    let report = subject.notify(&5);

    assert_eq!(report.notified, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].target, "faulty");
    assert_eq!(report.failures[0].message, "observer down");
    assert_eq!(*seen.lock().unwrap(), vec![("survivor", 5)]);
}

#[test]
fn observer_added_during_notify_waits_for_next_round() {
    let hits = Arc::new(AtomicUsize::new(0));
    let subject: Arc<Subject<u32>> = Arc::new(Subject::new());

    let weak = Arc::downgrade(&subject);
    let late = counter(&hits);
    let armed = Mutex::new(Some(late));
    subject.add_observer(Arc::new(move |_: &u32| {
        if let (Some(s), Some(o)) = (weak.upgrade(), armed.lock().unwrap().take()) {
            s.add_observer(o);
        }
    }));

    assert_eq!(subject.notify(&0).notified, 1);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    assert_eq!(subject.notify(&0).notified, 2);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn observer_removed_during_notify_still_sees_that_round() {
    let seen: Seen = Arc::default();
    let subject: Arc<Subject<u32>> = Arc::new(Subject::new());
    let victim = recorder("victim", &seen);

    let weak = Arc::downgrade(&subject);
    let target = Arc::clone(&victim);
    subject.add_observer(Arc::new(move |_: &u32| {
        if let Some(s) = weak.upgrade() {
            s.remove_observer(&target);
        }
    }));
    subject.add_observer(victim);

    subject.notify(&1);
    subject.notify(&2);
    assert_eq!(*seen.lock().unwrap(), vec![("victim", 1)]);
}
