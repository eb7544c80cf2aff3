use std::collections::VecDeque;

/// Largest ring kept by [`perceive_rings`]. MMFF only distinguishes 3-, 4-, 5- and
/// 6-membered rings, the rest are carried for completeness.
pub const MAX_RING_SIZE: usize = 8;

/// Finds the smallest cycle through every bond of the graph.
///
/// For each edge `(u, v)` the edge is masked out and a breadth-first search finds the
/// shortest path back from `v` to `u`; that path closes the smallest ring containing
/// the edge. Rings larger than [`MAX_RING_SIZE`] are dropped and duplicates are
/// removed after normalization. The result is sorted by size, then lexicographically.
pub fn perceive_rings(adjacency: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let mut rings: Vec<Vec<usize>> = Vec::new();

    for (u, neighbors) in adjacency.iter().enumerate() {
        for &v in neighbors {
            if v < u {
                continue;
            }
            if let Some(path) = shortest_path_avoiding_edge(adjacency, v, u, (u, v)) {
                if path.len() <= MAX_RING_SIZE {
                    rings.push(normalize_ring(&path));
                }
            }
        }
    }

    rings.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    rings.dedup();
    rings
}

fn shortest_path_avoiding_edge(
    adjacency: &[Vec<usize>],
    start: usize,
    goal: usize,
    masked: (usize, usize),
) -> Option<Vec<usize>> {
    let n = adjacency.len();
    let mut pred = vec![usize::MAX; n];
    let mut visited = vec![false; n];
    let mut queue = VecDeque::new();

    visited[start] = true;
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if current == goal {
            let mut path = vec![goal];
            let mut node = goal;
            while node != start {
                node = pred[node];
                path.push(node);
            }
            return Some(path);
        }
        for &next in &adjacency[current] {
            let is_masked = (current == masked.0 && next == masked.1)
                || (current == masked.1 && next == masked.0);
            if is_masked || visited[next] {
                continue;
            }
            visited[next] = true;
            pred[next] = current;
            queue.push_back(next);
        }
    }
    None
}

/// Rotates a ring so it starts at its smallest atom index and walks towards the
/// smaller of that atom's two ring neighbors.
pub fn normalize_ring(ring: &[usize]) -> Vec<usize> {
    let len = ring.len();
    if len == 0 {
        return Vec::new();
    }
    let start = ring
        .iter()
        .enumerate()
        .min_by_key(|&(_, &atom)| atom)
        .map(|(pos, _)| pos)
        .unwrap_or(0);

    let forward = ring[(start + 1) % len];
    let backward = ring[(start + len - 1) % len];

    if forward <= backward {
        (0..len).map(|k| ring[(start + k) % len]).collect()
    } else {
        (0..len).map(|k| ring[(start + len - k) % len]).collect()
    }
}
