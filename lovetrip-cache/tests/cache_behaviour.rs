//! Behavioural tests for `TtlCache` expiry and pattern deletion.

use std::cell::RefCell;
use std::sync::Arc;
use std::time::Duration;

use lovetrip_cache::{CacheError, TtlCache, test_support::ManualClock};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

const COURSE: [&str; 3] = ["Namsan Tower", "Myeongdong", "Cheonggyecheon"];

#[derive(Debug)]
struct CacheWorld {
    clock: Arc<ManualClock>,
    cache: RefCell<Option<TtlCache>>,
    deleted: RefCell<Option<Result<usize, CacheError>>>,
}

impl CacheWorld {
    fn with_cache<R>(&self, f: impl FnOnce(&TtlCache) -> R) -> R {
        let borrowed = self.cache.borrow();
        f(borrowed.as_ref().expect("cache should be created first"))
    }
}

#[fixture]
fn world() -> CacheWorld {
    CacheWorld {
        clock: Arc::new(ManualClock::default()),
        cache: RefCell::new(None),
        deleted: RefCell::new(None),
    }
}

#[given("a cache with a one minute lifetime")]
fn given_cache(world: &CacheWorld) {
    let cache = TtlCache::with_clock(world.clock.clone(), Duration::from_secs(60));
    world.cache.replace(Some(cache));
}

#[given("cached searches for seoul and busan")]
fn given_searches(world: &CacheWorld) {
    world.with_cache(|cache| {
        cache.set("place-search:seoul:20", vec![String::from("seoul-20")]);
        cache.set("place-search:seoul:10", vec![String::from("seoul-10")]);
        cache.set("place-search:busan:20", vec![String::from("busan-20")]);
    });
}

#[when("I store a course under {key}")]
fn store_course(world: &CacheWorld, key: String) {
    world.with_cache(|cache| cache.set(key, COURSE.to_vec()));
}

#[when("the clock advances {seconds} seconds")]
fn advance_clock(world: &CacheWorld, seconds: u64) {
    world.clock.advance(Duration::from_secs(seconds));
}

#[when("I delete keys matching {pattern}")]
fn delete_matching(world: &CacheWorld, pattern: String) {
    let outcome = world.with_cache(|cache| cache.delete_pattern(&pattern));
    world.deleted.replace(Some(outcome));
}

#[then("reading {key} misses")]
fn read_misses(world: &CacheWorld, key: String) {
    let value = world.with_cache(|cache| cache.get::<Vec<&str>>(&key));
    assert_eq!(value, None);
}

#[then("reading {key} returns the course")]
fn read_hits(world: &CacheWorld, key: String) {
    let value = world.with_cache(|cache| cache.get::<Vec<&str>>(&key));
    assert_eq!(value, Some(COURSE.to_vec()));
}

#[then("the cache is empty")]
fn cache_empty(world: &CacheWorld) {
    assert!(world.with_cache(TtlCache::is_empty));
}

#[then("the cache holds {count} entries")]
fn cache_holds(world: &CacheWorld, count: usize) {
    assert_eq!(world.with_cache(TtlCache::len), count);
}

#[then("{count} entries are removed")]
fn entries_removed(world: &CacheWorld, count: usize) {
    let deleted = world.deleted.borrow();
    let removed = deleted
        .as_ref()
        .expect("deletion should have run")
        .as_ref()
        .expect("pattern should be valid");
    assert_eq!(*removed, count);
}

#[then("the busan search is still cached")]
fn busan_cached(world: &CacheWorld) {
    let value = world.with_cache(|cache| cache.get::<Vec<String>>("place-search:busan:20"));
    assert_eq!(value, Some(vec![String::from("busan-20")]));
}

#[then("the pattern is rejected")]
fn pattern_rejected(world: &CacheWorld) {
    let deleted = world.deleted.borrow();
    let outcome = deleted.as_ref().expect("deletion should have run");
    assert!(matches!(outcome, Err(CacheError::InvalidPattern { .. })));
}

#[scenario(path = "tests/features/ttl_cache.feature", index = 0)]
fn entry_expires(world: CacheWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/ttl_cache.feature", index = 1)]
fn entry_readable_at_boundary(world: CacheWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/ttl_cache.feature", index = 2)]
fn pattern_invalidation(world: CacheWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/ttl_cache.feature", index = 3)]
fn invalid_pattern(world: CacheWorld) {
    let _ = world;
}
