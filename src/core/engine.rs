use crate::domain::model::{Assignment, AssignmentSet, Participant};
use crate::utils::error::{DrawError, Result};
use rand::Rng;
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

/// 初次洗牌之後最多再重洗的次數，超過就改用修補
pub const MAX_SHUFFLE_ATTEMPTS: usize = 100;

/// Draw a giver → receiver assignment for every participant using the
/// thread-local generator.
///
/// Every participant gives exactly once, receives exactly once and is never
/// assigned to themself. Either a fully valid set is returned or an error.
pub fn generate<Id>(participants: &[Participant<Id>]) -> Result<AssignmentSet<Id>>
where
    Id: Clone + Eq + Hash + Debug,
{
    generate_with_rng(participants, &mut rand::thread_rng())
}

/// Same as [`generate`], drawing randomness from `rng` so a seeded generator
/// reproduces the same assignment set.
pub fn generate_with_rng<Id, R>(
    participants: &[Participant<Id>],
    rng: &mut R,
) -> Result<AssignmentSet<Id>>
where
    Id: Clone + Eq + Hash + Debug,
    R: Rng + ?Sized,
{
    generate_with_attempts(participants, MAX_SHUFFLE_ATTEMPTS, rng)
}

pub fn generate_with_attempts<Id, R>(
    participants: &[Participant<Id>],
    max_attempts: usize,
    rng: &mut R,
) -> Result<AssignmentSet<Id>>
where
    Id: Clone + Eq + Hash + Debug,
    R: Rng + ?Sized,
{
    check_participants(participants)?;

    let ids: Vec<Id> = participants.iter().map(|p| p.id.clone()).collect();
    let mut receivers = shuffled(&ids, rng);

    let mut attempts = 0;
    while attempts < max_attempts && !is_derangement(&ids, &receivers) {
        receivers = shuffled(&ids, rng);
        attempts += 1;
    }

    tracing::debug!(
        "Shuffled {} participants with {} reshuffle(s)",
        ids.len(),
        attempts
    );

    if !is_derangement(&ids, &receivers) {
        let fixed_points = repair_fixed_points(&ids, &mut receivers);
        tracing::debug!(
            "Repaired {} self-assignment(s) after {} reshuffles",
            fixed_points,
            attempts
        );

        if !is_derangement(&ids, &receivers) {
            return Err(DrawError::AssignmentFailure {
                message: "self-assignment remains after repair".to_string(),
            });
        }
    }

    let names: HashMap<&Id, &str> = participants
        .iter()
        .map(|p| (&p.id, p.name.as_str()))
        .collect();
    let name_of = |id: &Id| -> Result<String> {
        names
            .get(id)
            .map(|name| name.to_string())
            .ok_or_else(|| DrawError::AssignmentFailure {
                message: format!("unknown participant id {:?} in assignment", id),
            })
    };

    let assignments = ids
        .iter()
        .zip(receivers.iter())
        .map(|(giver, receiver)| {
            Ok(Assignment {
                giver_id: giver.clone(),
                giver_name: name_of(giver)?,
                receiver_id: receiver.clone(),
                receiver_name: name_of(receiver)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    validate_assignments(&assignments, &ids)?;

    Ok(AssignmentSet::from_validated(assignments))
}

fn check_participants<Id>(participants: &[Participant<Id>]) -> Result<()>
where
    Id: Eq + Hash + Debug,
{
    if participants.len() < 2 {
        return Err(DrawError::InsufficientParticipants {
            count: participants.len(),
        });
    }

    let mut seen_ids = HashSet::with_capacity(participants.len());
    for participant in participants {
        if !seen_ids.insert(&participant.id) {
            return Err(DrawError::DuplicateIdentifier {
                id: format!("{:?}", participant.id),
            });
        }
    }

    // 名稱不分大小寫比對
    let mut seen_names = HashSet::with_capacity(participants.len());
    for participant in participants {
        if !seen_names.insert(participant.name.to_lowercase()) {
            return Err(DrawError::DuplicateName {
                name: participant.name.clone(),
            });
        }
    }

    Ok(())
}

/// Fisher–Yates: for `i` from `n-1` down to `1`, swap `i` with a uniform `j` in `[0, i]`.
pub(crate) fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.gen_range(0..=i);
        out.swap(i, j);
    }
    out
}

pub(crate) fn is_derangement<T: PartialEq>(original: &[T], permuted: &[T]) -> bool {
    original.len() == permuted.len() && original.iter().zip(permuted).all(|(o, p)| o != p)
}

/// Swap fixed points pairwise in index order; a leftover one is swapped with the
/// first position that leaves neither side fixed. Returns how many fixed points
/// were found.
pub(crate) fn repair_fixed_points<T: PartialEq>(original: &[T], permuted: &mut [T]) -> usize {
    let fixed: Vec<usize> = (0..original.len())
        .filter(|&i| original[i] == permuted[i])
        .collect();

    for pair in fixed.chunks(2) {
        match pair {
            &[a, b] => permuted.swap(a, b),
            &[k] => {
                let partner = (0..permuted.len()).find(|&m| {
                    m != k && original[m] != permuted[k] && original[k] != permuted[m]
                });
                if let Some(m) = partner {
                    permuted.swap(k, m);
                }
            }
            _ => {}
        }
    }

    fixed.len()
}

/// Check an assignment list against the participant ids without trusting how it
/// was built: every id must give exactly once and receive exactly once, and
/// nobody may give to themself.
pub fn validate_assignments<Id>(assignments: &[Assignment<Id>], ids: &[Id]) -> Result<()>
where
    Id: Eq + Hash + Debug,
{
    let mut giver_counts: HashMap<&Id, usize> = HashMap::with_capacity(ids.len());
    let mut receiver_counts: HashMap<&Id, usize> = HashMap::with_capacity(ids.len());

    for assignment in assignments {
        if assignment.giver_id == assignment.receiver_id {
            return Err(DrawError::AssignmentFailure {
                message: format!("{:?} is assigned to themself", assignment.giver_id),
            });
        }
        *giver_counts.entry(&assignment.giver_id).or_insert(0) += 1;
        *receiver_counts.entry(&assignment.receiver_id).or_insert(0) += 1;
    }

    for id in ids {
        let gives = giver_counts.get(id).copied().unwrap_or(0);
        if gives != 1 {
            return Err(DrawError::AssignmentFailure {
                message: format!("{:?} gives {} times (should be 1)", id, gives),
            });
        }
        let receives = receiver_counts.get(id).copied().unwrap_or(0);
        if receives != 1 {
            return Err(DrawError::AssignmentFailure {
                message: format!("{:?} receives {} times (should be 1)", id, receives),
            });
        }
    }

    // 每個人恰好一次之後，多出來的只可能是名單外的 id
    if assignments.len() != ids.len() {
        return Err(DrawError::AssignmentFailure {
            message: format!(
                "{} assignments for {} participants",
                assignments.len(),
                ids.len()
            ),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn people(names: &[&str]) -> Vec<Participant<String>> {
        names
            .iter()
            .map(|n| Participant::new(n.to_string(), *n))
            .collect()
    }

    fn assignment(giver: &str, receiver: &str) -> Assignment<String> {
        Assignment {
            giver_id: giver.to_string(),
            giver_name: giver.to_string(),
            receiver_id: receiver.to_string(),
            receiver_name: receiver.to_string(),
        }
    }

    #[test]
    fn test_shuffle_keeps_every_element() {
        let mut rng = StdRng::seed_from_u64(7);
        let items: Vec<u32> = (0..50).collect();
        let mut out = shuffled(&items, &mut rng);
        out.sort_unstable();
        assert_eq!(out, items);
    }

    #[test]
    fn test_shuffle_of_empty_and_single() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(shuffled::<u32, _>(&[], &mut rng).is_empty());
        assert_eq!(shuffled(&[1], &mut rng), vec![1]);
    }

    #[test]
    fn test_is_derangement() {
        assert!(is_derangement(&[1, 2, 3], &[2, 3, 1]));
        assert!(!is_derangement(&[1, 2, 3], &[1, 3, 2]));
        assert!(!is_derangement(&[1, 2, 3], &[2, 1]));
    }

    #[test]
    fn test_repair_identity_permutation() {
        let original = vec!["a", "b", "c", "d", "e"];
        let mut permuted = original.clone();

        let fixed = repair_fixed_points(&original, &mut permuted);

        assert_eq!(fixed, 5);
        assert_eq!(permuted, vec!["e", "a", "d", "c", "b"]);
        assert!(is_derangement(&original, &permuted));
    }

    #[test]
    fn test_repair_even_fixed_points_are_paired() {
        let original = vec![1, 2, 3, 4];
        let mut permuted = original.clone();
        repair_fixed_points(&original, &mut permuted);
        assert_eq!(permuted, vec![2, 1, 4, 3]);
    }

    #[test]
    fn test_repair_single_fixed_point() {
        let original = vec!["a", "b", "c"];
        let mut permuted = vec!["a", "c", "b"];

        let fixed = repair_fixed_points(&original, &mut permuted);

        assert_eq!(fixed, 1);
        assert_eq!(permuted, vec!["c", "a", "b"]);
        assert!(is_derangement(&original, &permuted));
    }

    #[test]
    fn test_repair_leaves_derangement_untouched() {
        let original = vec![1, 2, 3];
        let mut permuted = vec![3, 1, 2];
        assert_eq!(repair_fixed_points(&original, &mut permuted), 0);
        assert_eq!(permuted, vec![3, 1, 2]);
    }

    #[test]
    fn test_repair_path_without_reshuffles() {
        let group = people(&["A", "B", "C", "D"]);
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let set = generate_with_attempts(&group, 0, &mut rng).unwrap();
            assert_eq!(set.len(), 4);
            assert!(set.iter().all(|a| a.giver_id != a.receiver_id));
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let group = people(&["Ann", "Ben", "Cat", "Dan", "Eve", "Fay"]);
        let first = generate_with_rng(&group, &mut StdRng::seed_from_u64(42)).unwrap();
        let second = generate_with_rng(&group, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_names_are_carried_through() {
        let group = vec![
            Participant::new(1u32, "Alice"),
            Participant::new(2u32, "Bob"),
        ];
        let set = generate(&group).unwrap();
        let alice = set.receiver_of(&1).unwrap();
        assert_eq!(alice.giver_name, "Alice");
        assert_eq!(alice.receiver_id, 2);
        assert_eq!(alice.receiver_name, "Bob");
    }

    #[test]
    fn test_validate_rejects_double_receiver() {
        let ids = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let assignments = vec![
            assignment("a", "b"),
            assignment("b", "a"),
            assignment("c", "a"),
        ];
        let err = validate_assignments(&assignments, &ids).unwrap_err();
        assert!(matches!(err, DrawError::AssignmentFailure { .. }));
    }

    #[test]
    fn test_validate_rejects_self_assignment() {
        let ids = vec!["a".to_string(), "b".to_string()];
        let assignments = vec![assignment("a", "a"), assignment("b", "b")];
        assert!(validate_assignments(&assignments, &ids).is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_participant() {
        let ids = vec!["a".to_string(), "b".to_string()];
        let assignments = vec![
            assignment("a", "b"),
            assignment("b", "a"),
            assignment("x", "y"),
        ];
        assert!(validate_assignments(&assignments, &ids).is_err());
    }

    #[test]
    fn test_validate_accepts_cycle() {
        let ids = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let assignments = vec![
            assignment("a", "b"),
            assignment("b", "c"),
            assignment("c", "a"),
        ];
        assert!(validate_assignments(&assignments, &ids).is_ok());
    }
}
