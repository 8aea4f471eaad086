use serde::Serialize;
use std::f64::consts::PI;
use std::sync::OnceLock;
use utoipa::ToSchema;

pub const EARTH_RADIUS_KM: f64 = 6371.0;
const SURFACE_STEPS: usize = 50;
const MERIDIANS: usize = 12;
const MERIDIAN_POINTS: usize = 51;
const GRID_LIFT: f64 = 1.01;

/// Sphere mesh as three `SURFACE_STEPS x SURFACE_STEPS` grids.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Surface {
    pub x: Vec<Vec<f64>>,
    pub y: Vec<Vec<f64>>,
    pub z: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Polyline {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EarthGeometry {
    pub surface: Surface,
    pub meridians: Vec<Polyline>,
}

fn spherical(r: f64, phi: f64, theta: f64) -> (f64, f64, f64) {
    (
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

fn build() -> EarthGeometry {
    let mut surface = Surface {
        x: Vec::with_capacity(SURFACE_STEPS),
        y: Vec::with_capacity(SURFACE_STEPS),
        z: Vec::with_capacity(SURFACE_STEPS),
    };
    for i in 0..SURFACE_STEPS {
        let phi = i as f64 * PI / 25.0;
        let (mut xs, mut ys, mut zs) = (Vec::new(), Vec::new(), Vec::new());
        for j in 0..SURFACE_STEPS {
            let theta = j as f64 * 2.0 * PI / 50.0;
            let (x, y, z) = spherical(EARTH_RADIUS_KM, phi, theta);
            xs.push(x);
            ys.push(y);
            zs.push(z);
        }
        surface.x.push(xs);
        surface.y.push(ys);
        surface.z.push(zs);
    }

    let meridians = (0..MERIDIANS)
        .map(|k| {
            let theta = k as f64 * PI / 6.0;
            let mut line = Polyline {
                x: Vec::with_capacity(MERIDIAN_POINTS),
                y: Vec::with_capacity(MERIDIAN_POINTS),
                z: Vec::with_capacity(MERIDIAN_POINTS),
            };
            for l in 0..MERIDIAN_POINTS {
                let phi = l as f64 * PI / 50.0;
                let (x, y, z) = spherical(EARTH_RADIUS_KM * GRID_LIFT, phi, theta);
                line.x.push(x);
                line.y.push(y);
                line.z.push(z);
            }
            line
        })
        .collect();

    EarthGeometry { surface, meridians }
}

/// Computed on first use and shared afterwards.
pub fn earth_geometry() -> &'static EarthGeometry {
    static GEOMETRY: OnceLock<EarthGeometry> = OnceLock::new();
    GEOMETRY.get_or_init(build)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_is_a_50_by_50_sphere() {
        let g = earth_geometry();
        assert_eq!(g.surface.x.len(), 50);
        assert!(g.surface.z.iter().all(|row| row.len() == 50));

        assert!((g.surface.z[0][0] - EARTH_RADIUS_KM).abs() < 1e-9);
        let (x, y, z) = (g.surface.x[10][7], g.surface.y[10][7], g.surface.z[10][7]);
        assert!(((x * x + y * y + z * z).sqrt() - EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn meridians_sit_just_above_the_surface() {
        let g = earth_geometry();
        assert_eq!(g.meridians.len(), 12);
        for line in &g.meridians {
            assert_eq!(line.x.len(), 51);
            assert!((line.z[0] - EARTH_RADIUS_KM * 1.01).abs() < 1e-9);
            assert!((line.z[50] + EARTH_RADIUS_KM * 1.01).abs() < 1e-9);
        }
    }

    #[test]
    fn geometry_is_computed_once() {
        assert!(std::ptr::eq(earth_geometry(), earth_geometry()));
    }
}
