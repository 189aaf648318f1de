use flowdag::Registry;
use flowdag_test_utils::builders::RegistryBuilder;
use flowdag_test_utils::init_tracing;

fn names(registry: &Registry<String>) -> Vec<&str> {
    registry.iter().map(String::as_str).collect()
}

#[test]
fn chain_orders_producer_before_consumer() {
    init_tracing();
    let (registry, ids) = RegistryBuilder::new()
        .stage("f1", &["A"], &["B"])
        .stage("f2", &["B"], &["C"])
        .build();

    assert_eq!(names(&registry), ["f1", "f2"]);

    let f1 = registry.stage(ids["f1"]).unwrap();
    let f2 = registry.stage(ids["f2"]).unwrap();
    assert!(f2.priority() > f1.priority());
}

#[test]
fn registration_sequence_does_not_dictate_order() {
    init_tracing();
    // The consumer is registered first; ranking still puts the producer ahead.
    let (registry, _ids) = RegistryBuilder::new()
        .stage("late", &["mid"], &["done"])
        .stage("early", &["raw"], &["mid"])
        .build();

    assert_eq!(names(&registry), ["early", "late"]);
}

#[test]
fn diamond_ranks_both_branches_below_join() {
    init_tracing();
    let (registry, ids) = RegistryBuilder::new()
        .stage("g1", &["A"], &["B"])
        .stage("g2", &["A"], &["C"])
        .stage("g3", &["B", "C"], &["D"])
        .build();

    let g1 = registry.stage(ids["g1"]).unwrap().priority();
    let g2 = registry.stage(ids["g2"]).unwrap().priority();
    let g3 = registry.stage(ids["g3"]).unwrap().priority();
    assert!(g1 < g3);
    assert!(g2 < g3);
}

#[test]
fn iteration_is_stable_across_repeated_calls() {
    init_tracing();
    let (registry, _ids) = RegistryBuilder::new()
        .stage("a", &["x"], &["y"])
        .stage("b", &["y"], &["z"])
        .stage("c", &["x"], &["w"])
        .build();

    assert_eq!(names(&registry), names(&registry));
}

#[test]
fn iteration_is_a_permutation_of_registered_stages() {
    init_tracing();
    let (registry, _ids) = RegistryBuilder::new()
        .stage("a", &["x"], &["y"])
        .stage("b", &["y"], &["z"])
        .stage("c", &[], &["x"])
        .build();

    let mut seen = names(&registry);
    seen.sort_unstable();
    assert_eq!(seen, ["a", "b", "c"]);
}

#[test]
fn unrelated_stages_keep_registration_order() {
    init_tracing();
    // No shared labels anywhere: all ranks tie at zero, and the stable sort
    // must preserve the original relative order even as more stages arrive.
    let (registry, _ids) = RegistryBuilder::new()
        .stage("first", &["p"], &["q"])
        .stage("second", &["r"], &["s"])
        .stage("third", &["t"], &["u"])
        .build();

    assert_eq!(names(&registry), ["first", "second", "third"]);
}

#[test]
fn re_iteration_reflects_latest_registration() {
    init_tracing();
    let mut registry = Registry::new();
    registry.register("B", "C", "consumer").unwrap();

    let before: Vec<&str> = registry.iter().copied().collect();
    assert_eq!(before, ["consumer"]);

    registry.register("A", "B", "producer").unwrap();
    let after: Vec<&str> = registry.iter().copied().collect();
    assert_eq!(after, ["producer", "consumer"]);
}

#[test]
fn for_loop_iterates_work_in_rank_order() {
    init_tracing();
    let mut registry = Registry::new();
    registry.register("mid", "out", "second").unwrap();
    registry.register("in", "mid", "first").unwrap();

    let mut collected = Vec::new();
    for work in &registry {
        collected.push(*work);
    }
    assert_eq!(collected, ["first", "second"]);
}

#[test]
fn equal_work_values_get_distinct_stages() {
    init_tracing();
    let mut registry = Registry::new();
    let first = registry.register("A", "B", "noop").unwrap();
    let second = registry.register("B", "C", "noop").unwrap();

    assert_ne!(first, second);
    assert_eq!(registry.len(), 2);
    // Both stages stay queryable; neither overwrote the other's bookkeeping.
    assert_eq!(registry.successors(first).unwrap(), vec![second]);
}

#[test]
fn dump_lists_stages_in_rank_order() {
    init_tracing();
    let mut registry = Registry::new();
    registry.register("B", "C", "f2").unwrap();
    registry.register("A", "B", "f1").unwrap();

    let dump = registry.to_string();
    let lines: Vec<&str> = dump.lines().collect();
    assert_eq!(lines, ["0: [A] -- \"f1\" --> [B]", "1: [B] -- \"f2\" --> [C]"]);
}

#[test]
fn sources_are_stages_with_no_registered_producer() {
    init_tracing();
    let (registry, ids) = RegistryBuilder::new()
        .stage("root_a", &["ext"], &["m"])
        .stage("root_b", &[], &["n"])
        .stage("sink", &["m", "n"], &["out"])
        .build();

    let sources = registry.sources();
    assert!(sources.contains(&ids["root_a"]));
    assert!(sources.contains(&ids["root_b"]));
    assert!(!sources.contains(&ids["sink"]));
}
