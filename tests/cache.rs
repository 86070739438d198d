mod common;

use common::setup_logger;
use tracekv::trace;
use tracekv::{replay, Cache, MemStore, Result, Store, Value, STORE_OP};

fn setup() -> (MemStore, Cache<MemStore>) {
    let logger = setup_logger();
    let store = MemStore::new(logger.clone());
    let cache = Cache::new(store.clone(), logger).unwrap();
    (store, cache)
}

#[test]
fn test_round_trip_all_kinds() -> Result<()> {
    let (_store, cache) = setup();

    let key = cache.store(Value::from("hello"))?;
    assert_eq!(cache.get(&key)?, Some(b"hello".to_vec()));

    let key = cache.store(Value::from(vec![0u8, 159, 146, 150]))?;
    assert_eq!(cache.get(&key)?, Some(vec![0u8, 159, 146, 150]));

    let key = cache.store(Value::from(42i64))?;
    assert_eq!(cache.get_int(&key)?, Some(42));

    let key = cache.store(Value::from(2.5f64))?;
    assert_eq!(cache.get_str(&key)?, Some("2.5".to_owned()));
    Ok(())
}

#[test]
fn test_absent_key_is_none() -> Result<()> {
    let (_store, cache) = setup();
    assert_eq!(cache.get("nonexistent-key")?, None);
    assert_eq!(cache.get_str("nonexistent-key")?, None);
    assert_eq!(cache.get_int("nonexistent-key")?, None);
    Ok(())
}

#[test]
fn test_converter_sees_absent() -> Result<()> {
    let (_store, cache) = setup();
    let marker = cache.get_with("nonexistent-key", |raw| {
        Ok(match raw {
            Some(_) => "present",
            None => "absent",
        })
    })?;
    assert_eq!(marker, "absent");
    Ok(())
}

#[test]
fn test_new_flushes_store() -> Result<()> {
    let logger = setup_logger();
    let store = MemStore::new(logger.clone());
    store.set("stale".to_owned(), b"v".to_vec())?;

    let _cache = Cache::new(store.clone(), logger)?;
    assert_eq!(store.get("stale".to_owned())?, None);
    Ok(())
}

#[test]
fn test_store_counts_and_records_in_order() -> Result<()> {
    let (store, cache) = setup();

    let mut keys = Vec::new();
    for i in 0..5i64 {
        keys.push(cache.store(Value::from(i))?);
    }

    assert_eq!(trace::call_count(&store, STORE_OP)?, 5);

    let inputs = store.lrange(trace::inputs_key(STORE_OP), 0, -1)?;
    let outputs = store.lrange(trace::outputs_key(STORE_OP), 0, -1)?;
    assert_eq!(inputs.len(), 5);
    assert_eq!(outputs.len(), 5);
    for (i, (input, output)) in inputs.iter().zip(outputs.iter()).enumerate() {
        assert_eq!(input.as_slice(), i.to_string().as_bytes());
        assert_eq!(output.as_slice(), keys[i].as_bytes());
    }
    Ok(())
}

#[test]
fn test_generated_keys_are_unique() -> Result<()> {
    let (_store, cache) = setup();
    let mut keys = Vec::new();
    for _ in 0..100 {
        keys.push(cache.store(Value::from("v"))?);
    }
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), 100);
    Ok(())
}

#[test]
fn test_hello_42_scenario() -> Result<()> {
    let (store, cache) = setup();

    let k1 = cache.store(Value::from("hello"))?;
    assert_eq!(cache.get_str(&k1)?, Some("hello".to_owned()));

    let k2 = cache.store(Value::from(42i64))?;
    assert_eq!(cache.get_int(&k2)?, Some(42));

    assert_eq!(trace::call_count(&store, STORE_OP)?, 2);

    let mut out = Vec::new();
    replay(&store, STORE_OP, &mut out)?;
    let text = String::from_utf8(out)?;
    assert_eq!(
        text,
        format!(
            "Cache::store was called 2 times:\nCache::store(\"hello\") -> {}\nCache::store(42) -> {}\n",
            k1, k2
        )
    );
    Ok(())
}

#[test]
fn test_store_client_reaches_history() -> Result<()> {
    let (_store, cache) = setup();
    cache.store(Value::from("hello"))?;
    assert_eq!(trace::call_count(cache.store_client(), STORE_OP)?, 1);
    Ok(())
}
