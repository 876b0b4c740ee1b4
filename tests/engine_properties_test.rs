use gift_exchange::{
    generate, generate_with_attempts, generate_with_rng, AssignmentSet, DrawError, Participant,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn group(n: usize) -> Vec<Participant<usize>> {
    (0..n)
        .map(|i| Participant::new(i, format!("Person {}", i)))
        .collect()
}

fn assert_valid(set: &AssignmentSet<usize>, n: usize) {
    assert_eq!(set.len(), n);

    let givers: HashSet<usize> = set.iter().map(|a| a.giver_id).collect();
    let receivers: HashSet<usize> = set.iter().map(|a| a.receiver_id).collect();
    let everyone: HashSet<usize> = (0..n).collect();

    assert_eq!(givers, everyone, "every participant gives exactly once");
    assert_eq!(receivers, everyone, "every participant receives exactly once");
    for a in set {
        assert_ne!(a.giver_id, a.receiver_id, "{} assigned to themself", a.giver_id);
    }
}

/// 各種人數重複抽 1000 次，結果必須全部合法
#[test]
fn test_stress_all_outputs_valid() {
    for &n in &[2usize, 3, 5, 50, 1000] {
        let participants = group(n);
        let mut rng = StdRng::seed_from_u64(n as u64);
        for _ in 0..1000 {
            let set = generate_with_rng(&participants, &mut rng).unwrap();
            assert_valid(&set, n);
        }
    }
}

/// 關掉重洗直接走修補路徑，小人數最容易出現自己抽到自己
#[test]
fn test_stress_repair_path_only() {
    for &n in &[2usize, 3, 4, 5, 7] {
        let participants = group(n);
        let mut rng = StdRng::seed_from_u64(1234 + n as u64);
        for _ in 0..1000 {
            let set = generate_with_attempts(&participants, 0, &mut rng).unwrap();
            assert_valid(&set, n);
        }
    }
}

#[test]
fn test_too_few_participants() {
    let empty: Vec<Participant<usize>> = Vec::new();
    assert!(matches!(
        generate(&empty),
        Err(DrawError::InsufficientParticipants { count: 0 })
    ));
    assert!(matches!(
        generate(&group(1)),
        Err(DrawError::InsufficientParticipants { count: 1 })
    ));
}

#[test]
fn test_two_participants_always_swap() {
    let participants = vec![Participant::new("a", "Ann"), Participant::new("b", "Ben")];
    for _ in 0..100 {
        let set = generate(&participants).unwrap();
        assert_eq!(set.receiver_of(&"a").unwrap().receiver_id, "b");
        assert_eq!(set.receiver_of(&"b").unwrap().receiver_id, "a");
    }
}

#[test]
fn test_three_participants_form_a_cycle() {
    let participants = vec![
        Participant::new("A", "A"),
        Participant::new("B", "B"),
        Participant::new("C", "C"),
    ];

    for _ in 0..100 {
        let set = generate(&participants).unwrap();
        let pairs: Vec<(&str, &str)> = set.iter().map(|a| (a.giver_id, a.receiver_id)).collect();
        let forward = vec![("A", "B"), ("B", "C"), ("C", "A")];
        let backward = vec![("A", "C"), ("B", "A"), ("C", "B")];
        assert!(pairs == forward || pairs == backward, "unexpected {:?}", pairs);
    }
}

#[test]
fn test_case_insensitive_duplicate_name() {
    let participants = vec![
        Participant::new(1, "Alice"),
        Participant::new(2, "alice"),
        Participant::new(3, "Bob"),
    ];
    match generate(&participants) {
        Err(DrawError::DuplicateName { name }) => assert_eq!(name, "alice"),
        other => panic!("expected DuplicateName, got {:?}", other),
    }
}

#[test]
fn test_duplicate_identifier() {
    let participants = vec![
        Participant::new(1, "Alice"),
        Participant::new(1, "Bob"),
        Participant::new(2, "Carol"),
    ];
    assert!(matches!(
        generate(&participants),
        Err(DrawError::DuplicateIdentifier { .. })
    ));
}

#[test]
fn test_repeated_calls_differ_but_stay_valid() {
    let participants = group(30);
    let outputs: HashSet<Vec<usize>> = (0..20)
        .map(|_| {
            let set = generate(&participants).unwrap();
            assert_valid(&set, 30);
            set.iter().map(|a| a.receiver_id).collect()
        })
        .collect();
    assert!(outputs.len() > 1);
}

#[test]
fn test_same_seed_same_draw() {
    let participants = group(12);
    let first = generate_with_rng(&participants, &mut StdRng::seed_from_u64(99)).unwrap();
    let second = generate_with_rng(&participants, &mut StdRng::seed_from_u64(99)).unwrap();
    assert_eq!(first, second);
}
