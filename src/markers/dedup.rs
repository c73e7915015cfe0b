use crate::color::ColorName;
use crate::types::{MarkerShape, Rgb};

/// Marker candidate in interior-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Blob {
    pub color: ColorName,
    pub center: [f32; 2],
    pub area: f64,
    pub shape: MarkerShape,
    pub rgb: Rgb,
}

/// Single-linkage clustering of same-color blobs within `radius`.
///
/// Each cluster becomes one blob at the mean center, carrying the shape and
/// color sample of its largest member. Clusters are emitted in the order of
/// their first member.
pub(crate) fn merge_close_blobs(blobs: Vec<Blob>, radius: f32) -> Vec<Blob> {
    let n = blobs.len();
    let mut parent: Vec<usize> = (0..n).collect();
    fn find(parent: &mut [usize], mut i: usize) -> usize {
        while parent[i] != i {
            parent[i] = parent[parent[i]];
            i = parent[i];
        }
        i
    }

    let r2 = radius * radius;
    for i in 0..n {
        for j in i + 1..n {
            if blobs[i].color != blobs[j].color {
                continue;
            }
            let dx = blobs[i].center[0] - blobs[j].center[0];
            let dy = blobs[i].center[1] - blobs[j].center[1];
            if dx * dx + dy * dy <= r2 {
                let (a, b) = (find(&mut parent, i), find(&mut parent, j));
                if a != b {
                    parent[b.max(a)] = a.min(b);
                }
            }
        }
    }

    let mut groups: Vec<(usize, Vec<usize>)> = Vec::new();
    for i in 0..n {
        let root = find(&mut parent, i);
        match groups.iter_mut().find(|(r, _)| *r == root) {
            Some((_, members)) => members.push(i),
            None => groups.push((root, vec![i])),
        }
    }

    groups
        .into_iter()
        .map(|(_, members)| {
            let count = members.len() as f32;
            let cx = members.iter().map(|&i| blobs[i].center[0]).sum::<f32>() / count;
            let cy = members.iter().map(|&i| blobs[i].center[1]).sum::<f32>() / count;
            let largest = members
                .iter()
                .map(|&i| blobs[i])
                .max_by(|a, b| a.area.total_cmp(&b.area))
                .unwrap_or(blobs[members[0]]);
            Blob {
                center: [cx, cy],
                ..largest
            }
        })
        .collect()
}
