//! Canonical sample clouds: point sets on unit surfaces, scaled per body by
//! its `size`.

use glam::Vec3;
use std::collections::HashMap;

/// Points on the unit sphere, produced by midpoint subdivision of an
/// octahedron. Subdivision 0 is the six axis poles; each level splits every
/// triangular face into four and pushes the new vertices onto the sphere.
///
/// Vertices shared between faces are emitted once. The count grows as
/// `4^n * 4 + 2`: 6, 18, 66, 258, ...
pub fn unit_sphere_points(subdivisions: u32) -> Vec<Vec3> {
    let mut vertices = vec![
        Vec3::X,
        Vec3::NEG_X,
        Vec3::Y,
        Vec3::NEG_Y,
        Vec3::Z,
        Vec3::NEG_Z,
    ];
    let mut faces: Vec<[usize; 3]> = vec![
        [0, 2, 4],
        [2, 1, 4],
        [1, 3, 4],
        [3, 0, 4],
        [2, 0, 5],
        [1, 2, 5],
        [3, 1, 5],
        [0, 3, 5],
    ];

    for _ in 0..subdivisions {
        let mut edge_cache: HashMap<(usize, usize), usize> = HashMap::new();
        let mut next_faces = Vec::with_capacity(faces.len() * 4);
        for [a, b, c] in faces {
            let ab = midpoint(&mut vertices, &mut edge_cache, a, b);
            let bc = midpoint(&mut vertices, &mut edge_cache, b, c);
            let ca = midpoint(&mut vertices, &mut edge_cache, c, a);
            next_faces.push([a, ab, ca]);
            next_faces.push([ab, b, bc]);
            next_faces.push([ca, bc, c]);
            next_faces.push([ab, bc, ca]);
        }
        faces = next_faces;
    }

    vertices
}

fn midpoint(
    vertices: &mut Vec<Vec3>,
    edge_cache: &mut HashMap<(usize, usize), usize>,
    a: usize,
    b: usize,
) -> usize {
    let key = if a < b { (a, b) } else { (b, a) };
    *edge_cache.entry(key).or_insert_with(|| {
        let v = ((vertices[a] + vertices[b]) * 0.5).normalize();
        vertices.push(v);
        vertices.len() - 1
    })
}

/// The 26 surface lattice points of the cube spanning [-1, 1] on each axis:
/// corners, edge midpoints, and face centers.
pub fn unit_cube_points() -> Vec<Vec3> {
    let mut points = Vec::with_capacity(26);
    for x in -1..=1 {
        for y in -1..=1 {
            for z in -1..=1 {
                if x == 0 && y == 0 && z == 0 {
                    continue;
                }
                points.push(Vec3::new(x as f32, y as f32, z as f32));
            }
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_point_counts_follow_subdivision() {
        assert_eq!(unit_sphere_points(0).len(), 6);
        assert_eq!(unit_sphere_points(1).len(), 18);
        assert_eq!(unit_sphere_points(2).len(), 66);
        assert_eq!(unit_sphere_points(3).len(), 258);
    }

    #[test]
    fn sphere_points_lie_on_unit_sphere() {
        for p in unit_sphere_points(3) {
            assert!((p.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn sphere_points_are_distinct() {
        let points = unit_sphere_points(2);
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                assert!(a.distance_squared(*b) > 1e-6);
            }
        }
    }

    #[test]
    fn cube_lattice_has_26_points() {
        let points = unit_cube_points();
        assert_eq!(points.len(), 26);
        assert!(points.contains(&Vec3::new(1.0, 1.0, 1.0)));
        assert!(points.contains(&Vec3::new(-1.0, 0.0, 0.0)));
        assert!(!points.contains(&Vec3::ZERO));
    }

    #[test]
    fn cube_points_reach_the_surface() {
        for p in unit_cube_points() {
            let max_axis = p.abs().max_element();
            assert_eq!(max_axis, 1.0);
        }
    }
}
