use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MeshError {
    #[error("sphere radius must be a positive finite number, got {0}")]
    InvalidRadius(f32),
    #[error("sphere needs at least 1 ring, got {0}")]
    TooFewRings(u32),
    #[error("each ring needs at least 3 vertices, got {0}")]
    TooFewVerticesPerRing(u32),
    #[error("{rings} rings of {vertices_per_ring} vertices overflow 32-bit indices or draw counts")]
    IndexOverflow { rings: u32, vertices_per_ring: u32 },
}

/// Closed UV-sphere hanging below its apex.
///
/// Vertex 0 is the apex at the local origin, followed by `rings` rings of
/// `vertices_per_ring` points (top ring first), and the base pole last.
#[derive(Clone, Debug)]
pub struct Sphere {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
    center: [f32; 3],
}

impl Sphere {
    pub fn generate(
        radius: f32,
        ring_count: u32,
        vertices_per_ring: u32
    ) -> Result<Sphere, MeshError> {
        if !radius.is_finite() || radius <= 0. {
            return Err(MeshError::InvalidRadius(radius));
        }
        if ring_count < 1 {
            return Err(MeshError::TooFewRings(ring_count));
        }
        if vertices_per_ring < 3 {
            return Err(MeshError::TooFewVerticesPerRing(vertices_per_ring));
        }

        // the last index handed out is the base pole, L*D + 1, and the
        // 6*L*D entries of the index buffer are drawn with a signed count
        let (l, d) = (ring_count as u64, vertices_per_ring as u64);
        let fits = l * d + 2 <= u32::MAX as u64 && 6 * l * d <= i32::MAX as u64;
        if !fits {
            return Err(MeshError::IndexOverflow {
                rings: ring_count,
                vertices_per_ring,
            });
        }

        Ok(Sphere {
            vertices: generate_vertices(radius, ring_count, vertices_per_ring),
            indices: generate_indices(ring_count, vertices_per_ring),
            center: [0., -radius, 0.],
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn position(&self, index: usize) -> [f32; 3] {
        let v = &self.vertices[3 * index..3 * index + 3];
        [v[0], v[1], v[2]]
    }

    /// Center of the sphere in mesh space, one radius below the apex.
    pub fn center(&self) -> [f32; 3] {
        self.center
    }
}

fn generate_vertices(
    radius: f32,
    ring_count: u32,
    vertices_per_ring: u32
) -> Vec<f32> {
    let mut vertices = Vec::<f32>::with_capacity(
        3 * (ring_count as usize * vertices_per_ring as usize + 2)
    );

    let apex = [0f32; 3];
    vertices.extend_from_slice(&apex);

    let level_step = 2. * radius / (ring_count + 1) as f32;
    let angle_step = 360. / vertices_per_ring as f32;

    for ring in 0..ring_count {
        let depth = (ring + 1) as f32 * level_step;
        let ring_radius = (radius.powi(2) - (radius - depth).powi(2)).max(0.).sqrt();

        for v in 0..vertices_per_ring {
            let angle = (v as f32 * angle_step).to_radians();

            vertices.push(ring_radius * angle.cos());
            vertices.push(apex[1] - depth);
            vertices.push(ring_radius * angle.sin());
        }
    }

    vertices.push(apex[0]);
    vertices.push(apex[1] - 2. * radius);
    vertices.push(apex[2]);

    vertices
}

fn generate_indices(
    ring_count: u32,
    vertices_per_ring: u32
) -> Vec<u32> {
    let d = vertices_per_ring;

    let mut indices = Vec::<u32>::with_capacity(
        6 * d as usize + 6 * d as usize * (ring_count as usize - 1)
    );

    // ring vertices start at 1, right after the apex
    let ring_vertex = |ring: u32, i: u32| 1 + ring * d + i % d;

    let apex = 0;
    for i in 0..d {
        indices.push(ring_vertex(0, i));
        indices.push(ring_vertex(0, i + 1));
        indices.push(apex);
    }

    for ring in 0..ring_count - 1 {
        for i in 0..d {
            let top = ring_vertex(ring, i);
            let top_next = ring_vertex(ring, i + 1);
            let bottom = ring_vertex(ring + 1, i);
            let bottom_next = ring_vertex(ring + 1, i + 1);

            indices.extend_from_slice(&[top, bottom, bottom_next]);
            indices.extend_from_slice(&[top, bottom_next, top_next]);
        }
    }

    let last = ring_count - 1;
    let base = ring_count * d + 1;
    for i in 0..d {
        indices.push(ring_vertex(last, i));
        indices.push(base);
        indices.push(ring_vertex(last, i + 1));
    }

    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    #[test]
    fn buffer_sizes_follow_ring_layout() {
        for &(radius, rings, per_ring) in &[(1., 1, 3), (0.5, 2, 4), (3., 7, 12), (10., 20, 5)] {
            let sphere = Sphere::generate(radius, rings, per_ring).unwrap();
            let (l, d) = (rings as usize, per_ring as usize);

            assert_eq!(sphere.vertex_count(), l * d + 2);
            assert_eq!(sphere.vertices.len(), 3 * (l * d + 2));
            assert_eq!(sphere.indices.len(), 2 * 3 * d + (l - 1) * 6 * d);
            assert_eq!(sphere.triangle_count(), 2 * d + (l - 1) * 2 * d);
        }
    }

    #[test]
    fn two_rings_of_four() {
        let sphere = Sphere::generate(1., 2, 4).unwrap();

        assert_eq!(sphere.vertex_count(), 10);
        assert_eq!(sphere.vertices.len(), 30);
        assert_eq!(sphere.indices.len(), 48);
        assert_eq!(sphere.triangle_count(), 16);

        assert_eq!(&sphere.indices[..12], &[1, 2, 0, 2, 3, 0, 3, 4, 0, 4, 1, 0]);
        assert_eq!(&sphere.indices[12..18], &[1, 5, 6, 1, 6, 2]);
        assert_eq!(&sphere.indices[30..36], &[4, 8, 5, 4, 5, 1]);
        assert_eq!(&sphere.indices[36..], &[5, 9, 6, 6, 9, 7, 7, 9, 8, 8, 9, 5]);
    }

    #[test]
    fn poles_sit_on_the_vertical_axis() {
        let sphere = Sphere::generate(2.5, 5, 8).unwrap();

        assert_eq!(sphere.position(0), [0., 0., 0.]);
        assert_eq!(sphere.position(sphere.vertex_count() - 1), [0., -5., 0.]);
        assert_eq!(sphere.center(), [0., -2.5, 0.]);
    }

    #[test]
    fn ring_vertices_match_latitude_radius() {
        let radius = 1.5;
        let (rings, per_ring) = (6, 9);
        let sphere = Sphere::generate(radius, rings, per_ring).unwrap();
        let step = 2. * radius / (rings + 1) as f32;

        for ring in 0..rings {
            let h = (ring + 1) as f32 * step;
            let expected = (radius * radius - (radius - h) * (radius - h)).sqrt();

            for i in 0..per_ring {
                let [x, y, z] = sphere.position((1 + ring * per_ring + i) as usize);
                assert!(((x * x + z * z).sqrt() - expected).abs() < EPSILON);
                assert!((y + h).abs() < EPSILON);

                let from_center = sub([x, y, z], sphere.center());
                assert!((dot(from_center, from_center).sqrt() - radius).abs() < EPSILON);
            }
        }
    }

    #[test]
    fn first_vertex_of_each_ring_is_at_angle_zero() {
        let sphere = Sphere::generate(1., 3, 6).unwrap();

        for ring in 0..3 {
            let [x, _, z] = sphere.position(1 + ring * 6);
            assert!(x > 0.);
            assert!(z.abs() < EPSILON);
        }
    }

    #[test]
    fn indices_stay_in_range_and_cover_every_ring_vertex() {
        let sphere = Sphere::generate(1., 4, 7).unwrap();
        let count = sphere.vertex_count();
        let mut used = vec![false; count];

        for &index in &sphere.indices {
            assert!((index as usize) < count);
            used[index as usize] = true;
        }

        assert!(used.iter().all(|&u| u));
    }

    #[test]
    fn every_triangle_winds_the_same_way() {
        let sphere = Sphere::generate(1., 5, 10).unwrap();
        let center = sphere.center();

        for triangle in sphere.indices.chunks(3) {
            let a = sphere.position(triangle[0] as usize);
            let b = sphere.position(triangle[1] as usize);
            let c = sphere.position(triangle[2] as usize);

            let normal = cross(sub(b, a), sub(c, a));
            let centroid = [
                (a[0] + b[0] + c[0]) / 3.,
                (a[1] + b[1] + c[1]) / 3.,
                (a[2] + b[2] + c[2]) / 3.,
            ];

            // clockwise seen from outside, so the face normal points inward
            assert!(dot(normal, sub(centroid, center)) < 0., "{:?}", triangle);
        }
    }

    #[test]
    fn single_ring_has_only_fans() {
        let sphere = Sphere::generate(1., 1, 3).unwrap();

        assert_eq!(sphere.indices, vec![1, 2, 0, 2, 3, 0, 3, 1, 0, 1, 4, 2, 2, 4, 3, 3, 4, 1]);
    }

    #[test]
    fn rejects_bad_parameters() {
        assert_eq!(Sphere::generate(0., 2, 4).unwrap_err(), MeshError::InvalidRadius(0.));
        assert!(matches!(Sphere::generate(f32::NAN, 2, 4), Err(MeshError::InvalidRadius(_))));
        assert_eq!(Sphere::generate(1., 0, 4).unwrap_err(), MeshError::TooFewRings(0));
        assert_eq!(Sphere::generate(1., 2, 2).unwrap_err(), MeshError::TooFewVerticesPerRing(2));
        assert!(matches!(
            Sphere::generate(1., u32::MAX, 3),
            Err(MeshError::IndexOverflow { .. })
        ));
    }

    #[test]
    fn rejects_index_buffers_too_long_to_draw() {
        // 20000 * 20000 + 2 vertices fit in u32, but 6 * 4e8 indices do not fit in i32
        assert_eq!(
            Sphere::generate(1., 20_000, 20_000).unwrap_err(),
            MeshError::IndexOverflow { rings: 20_000, vertices_per_ring: 20_000 }
        );
        assert!(Sphere::generate(1., 2, 4).is_ok());
    }
}
