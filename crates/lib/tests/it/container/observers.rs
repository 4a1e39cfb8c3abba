use std::{cell::RefCell, rc::Rc};

use templar::{
    Container, Value,
    container::ValueChange,
};

type Log = Rc<RefCell<Vec<String>>>;

fn recorder(log: &Log, name: &'static str) -> impl Fn(&ValueChange<'_>) + 'static {
    let log = Rc::clone(log);
    move |change: &ValueChange<'_>| {
        let describe = |value: Option<&Value>| value.map_or("-".to_string(), |v| v.to_string());
        log.borrow_mut().push(format!(
            "{name}:{}:{}->{}",
            change.key,
            describe(change.old),
            describe(change.new)
        ));
    }
}

#[test]
fn test_set_and_remove_notify_in_registration_order() -> templar::Result<()> {
    let log: Log = Rc::default();
    let mut c = Container::new();
    c.subscribe(recorder(&log, "first"));
    c.subscribe(recorder(&log, "second"));

    c.set("hp", 1)?;
    c.set("hp", 2)?;
    c.remove("hp");
    c.remove("hp");

    assert_eq!(
        *log.borrow(),
        vec![
            "first:hp:-->1",
            "second:hp:-->1",
            "first:hp:1->2",
            "second:hp:1->2",
            "first:hp:2->-",
            "second:hp:2->-",
        ]
    );
    Ok(())
}

#[test]
fn test_nested_mutations_do_not_notify_parent() -> templar::Result<()> {
    let log: Log = Rc::default();
    let mut c = Container::new();
    c.set("stats", Container::new())?;
    c.subscribe(recorder(&log, "root"));

    c.path_set("stats.hp", 5)?;
    c.get_container_mut("stats").expect("stats exists").set("mp", 3)?;
    assert!(log.borrow().is_empty());

    // Creating a missing branch is a top-level write
    c.path_set("loot.gold", 10)?;
    assert_eq!(log.borrow().len(), 1);
    assert!(log.borrow()[0].starts_with("root:loot:-->"));
    Ok(())
}

#[test]
fn test_unsubscribe_during_dispatch() -> templar::Result<()> {
    let mut c = Container::new();
    let calls = Rc::new(RefCell::new(Vec::new()));

    let observers = c.observers().clone();
    let own_id = Rc::new(RefCell::new(None));
    let once = {
        let calls = Rc::clone(&calls);
        let own_id = Rc::clone(&own_id);
        move |_: &ValueChange<'_>| {
            calls.borrow_mut().push("once");
            if let Some(id) = own_id.borrow_mut().take() {
                assert!(observers.unsubscribe(id));
            }
        }
    };
    *own_id.borrow_mut() = Some(c.subscribe(once));

    let always = {
        let calls = Rc::clone(&calls);
        move |_: &ValueChange<'_>| calls.borrow_mut().push("always")
    };
    c.subscribe(always);

    c.set("a", 1)?;
    c.set("a", 2)?;

    assert_eq!(*calls.borrow(), vec!["once", "always", "always"]);
    assert_eq!(c.observers().len(), 1);
    Ok(())
}

#[test]
fn test_unsubscribe_unknown_id() {
    let c = Container::new();
    let id = c.subscribe(|_| {});
    assert!(c.unsubscribe(id));
    assert!(!c.unsubscribe(id));
    assert!(c.observers().is_empty());
}

#[test]
fn test_copies_do_not_inherit_observers() -> templar::Result<()> {
    let log: Log = Rc::default();
    let original = Container::new();
    original.subscribe(recorder(&log, "orig"));

    let mut copy = original.deep_copy();
    copy.set("x", 1)?;
    let mut clone = original.clone();
    clone.set("y", 1)?;

    assert!(log.borrow().is_empty());
    assert_eq!(copy.observers().len(), 0);
    Ok(())
}
