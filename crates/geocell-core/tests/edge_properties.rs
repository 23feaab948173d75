use geocell_core::{EdgeLoop, Geofence, LatLng, LinkedGeoLoop};
use proptest::prelude::*;

fn coords() -> impl Strategy<Value = Vec<LatLng>> {
    prop::collection::vec((-1.5f64..1.5, -3.1f64..3.1), 0..40).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(lat, lon)| LatLng::from_radians(lat, lon))
            .collect()
    })
}

proptest! {
    #[test]
    fn geofence_yields_one_chained_edge_per_vertex(verts in coords()) {
        let fence = Geofence::new(verts.clone());
        let edges: Vec<_> = fence.edges().collect();
        prop_assert_eq!(edges.len(), verts.len());
        for i in 0..edges.len() {
            prop_assert_eq!(edges[i].0, verts[i]);
            prop_assert_eq!(edges[i].1, edges[(i + 1) % edges.len()].0);
        }
    }

    #[test]
    fn linked_loop_matches_geofence(verts in coords()) {
        let fence = Geofence::new(verts.clone());
        let lp: LinkedGeoLoop = verts.into_iter().collect();
        prop_assert_eq!(lp.is_empty(), fence.is_empty());
        prop_assert!(lp.edges().eq(fence.edges()));
    }

    #[test]
    fn flattening_preserves_vertices(verts in coords()) {
        let lp: LinkedGeoLoop = verts.iter().copied().collect();
        let fence = Geofence::from(&lp);
        prop_assert_eq!(fence.vertices(), verts.as_slice());
    }

    #[test]
    fn degrees_round_trip(lat in -1.5f64..1.5, lon in -3.14f64..3.14) {
        let p = LatLng::from_radians(lat, lon);
        let back = p.to_degrees().to_radians();
        prop_assert!((back.lat - lat).abs() < 1e-12);
        prop_assert!((back.lon - lon).abs() < 1e-12);
    }
}
