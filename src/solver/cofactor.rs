//! cofactor.rs
//! The nontouching-loop determinant of Mason's rule.

use std::collections::HashSet;

use petgraph::graph::NodeIndex;

use crate::algebra::Expr;
use crate::analysis::Cycle;

/// Determinant of a cycle set:
///
/// ```text
/// Δ(C) = 1 + Σ_{k=1..|C|} (-1)^k · Σ_{nontouching k-subsets S of C} Π_{c in S} gain(c)
/// ```
///
/// Subsets are enumerated by increasing size with a disjointness filter
/// per subset; individual loop gains are subtracted, products of
/// nontouching pairs added, triples subtracted, and so on. The empty
/// cycle set yields exactly 1. Worst-case cost is exponential in |C| —
/// inherent to exact evaluation, and accepted.
pub fn cofactor(cycles: &[&Cycle]) -> Expr {
    let mut delta = Expr::one();
    for size in 1..=cycles.len() {
        let negative = size % 2 == 1;
        let mut combo: Vec<usize> = (0..size).collect();
        loop {
            if collectively_disjoint(cycles, &combo) {
                let mut term = Expr::one();
                for &i in &combo {
                    term = term * cycles[i].gain().clone();
                }
                delta = if negative { delta - term } else { delta + term };
            }
            if !advance(&mut combo, cycles.len()) {
                break;
            }
        }
    }
    delta
}

/// Collective node-disjointness as a single cardinality check: the union
/// of the cycles' node sets is exactly as large as the sum of their
/// sizes. Equivalent to pairwise disjointness because each cycle's nodes
/// are distinct.
fn collectively_disjoint(cycles: &[&Cycle], combo: &[usize]) -> bool {
    let mut union: HashSet<NodeIndex> = HashSet::new();
    let mut total = 0;
    for &i in combo {
        total += cycles[i].nodes().len();
        union.extend(cycles[i].nodes().iter().copied());
    }
    union.len() == total
}

/// Advances `combo` to the next k-combination of `0..n` in lexicographic
/// order. Returns false once exhausted.
fn advance(combo: &mut [usize], n: usize) -> bool {
    let k = combo.len();
    let mut i = k;
    while i > 0 {
        i -= 1;
        if combo[i] != i + n - k {
            combo[i] += 1;
            for j in i + 1..k {
                combo[j] = combo[j - 1] + 1;
            }
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::parse_expr;
    use crate::analysis::NodeSeq;

    fn cycle(node_indices: &[usize], gain: &str) -> Cycle {
        let nodes: NodeSeq = node_indices.iter().map(|&i| NodeIndex::new(i)).collect();
        Cycle::new(nodes, parse_expr(gain).expect("test gain parses"))
    }

    fn delta(cycles: &[Cycle]) -> Expr {
        let refs: Vec<&Cycle> = cycles.iter().collect();
        cofactor(&refs)
    }

    #[test]
    fn test_empty_cycle_set_is_one() {
        assert_eq!(delta(&[]), Expr::one());
    }

    #[test]
    fn test_single_cycle() {
        let d = delta(&[cycle(&[0, 1], "g")]);
        assert_eq!(d, parse_expr("1 - g").unwrap());
    }

    #[test]
    fn test_two_disjoint_cycles_have_cross_term() {
        let d = delta(&[cycle(&[0, 1], "g1"), cycle(&[2, 3], "g2")]);
        assert_eq!(d, parse_expr("1 - g1 - g2 + g1*g2").unwrap());
    }

    #[test]
    fn test_two_touching_cycles_have_no_cross_term() {
        let d = delta(&[cycle(&[0, 1], "g1"), cycle(&[1, 2], "g2")]);
        assert_eq!(d, parse_expr("1 - g1 - g2").unwrap());
    }

    #[test]
    fn test_three_disjoint_cycles_alternate_signs() {
        let d = delta(&[
            cycle(&[0, 1], "g1"),
            cycle(&[2, 3], "g2"),
            cycle(&[4, 5], "g3"),
        ]);
        let expected = parse_expr(
            "1 - g1 - g2 - g3 + g1*g2 + g1*g3 + g2*g3 - g1*g2*g3",
        )
        .unwrap();
        assert_eq!(d, expected);
    }

    #[test]
    fn test_mixed_touching_and_disjoint() {
        // g1 and g3 are disjoint; g2 touches both.
        let d = delta(&[
            cycle(&[0, 1], "g1"),
            cycle(&[1, 2, 3], "g2"),
            cycle(&[3, 4], "g3"),
        ]);
        assert_eq!(d, parse_expr("1 - g1 - g2 - g3 + g1*g3").unwrap());
    }

    #[test]
    fn test_advance_walks_all_combinations() {
        let mut combo = vec![0, 1];
        let mut seen = vec![combo.clone()];
        while advance(&mut combo, 4) {
            seen.push(combo.clone());
        }
        assert_eq!(
            seen,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3],
            ]
        );
    }
}
