//! Unit tests for kp-route.

#[cfg(test)]
mod helpers {
    use kp_core::StationId;
    use kp_world::{TransitNetwork, TransitNetworkBuilder};

    /// A square o-p-q-r-o with diagonal o-q; p and q are interchanges.
    ///
    /// Lines: A = o,p,q   B = q,r,o   C = p,r
    pub fn square() -> TransitNetwork {
        let mut b = TransitNetworkBuilder::new();
        b.add_link("o", "p", 2.0);
        b.add_link("p", "q", 2.0);
        b.add_link("q", "r", 2.0);
        b.add_link("r", "o", 2.0);
        b.add_link("o", "q", 3.0);
        b.add_link("p", "r", 3.0);
        b.add_line("A", &["o", "p", "q"], false);
        b.add_line("B", &["q", "r", "o"], false);
        b.add_line("C", &["p", "r"], false);
        b.add_interchange("p", "A", "C", 1.0);
        b.add_interchange("q", "A", "B", 1.0);
        b.add_interchange("r", "B", "C", 1.0);
        b.build().unwrap()
    }

    pub fn ids(net: &TransitNetwork, labels: &str) -> Vec<StationId> {
        labels.chars().map(|c| net.station(&c.to_string()).unwrap()).collect()
    }
}

// ── RouteLedger ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod ledger {
    use super::helpers::{ids, square};
    use crate::{Admission, RouteLedger, SHORTEST_SENTINEL};

    #[test]
    fn starts_empty_at_sentinel() {
        let net = square();
        let ledger = RouteLedger::new(ids(&net, "o")[0], &net, 10.0, 3);
        assert_eq!(ledger.shortest(), SHORTEST_SENTINEL);
        assert!(ledger.best_route().is_none());
        assert!(ledger.finalize().is_none());
    }

    #[test]
    fn rejects_routes_not_from_origin() {
        let net = square();
        let mut ledger = RouteLedger::new(ids(&net, "o")[0], &net, 10.0, 3);
        assert_eq!(ledger.offer(&ids(&net, "qo"), 4.0), Admission::Malformed);
        assert_eq!(ledger.offer(&[], 4.0), Admission::Malformed);
        assert_eq!(ledger.shortest(), SHORTEST_SENTINEL);
        assert_eq!(ledger.offered(), 2);
    }

    #[test]
    fn keeps_ascending_order_and_tracks_best() {
        let net = square();
        let mut ledger = RouteLedger::new(ids(&net, "o")[0], &net, 10.0, 3);
        assert_eq!(ledger.offer(&ids(&net, "opq"), 5.0), Admission::Admitted);
        assert_eq!(ledger.offer(&ids(&net, "oq"), 4.0), Admission::Admitted);
        assert_eq!(ledger.offer(&ids(&net, "orq"), 6.0), Admission::Admitted);

        let costs: Vec<f64> = ledger.entries().iter().map(|e| e.cost).collect();
        assert_eq!(costs, vec![4.0, 5.0, 6.0]);
        assert_eq!(ledger.shortest(), 4.0);
        assert_eq!(ledger.best_route(), Some(ids(&net, "oq").as_slice()));
    }

    #[test]
    fn duplicates_rejected() {
        let net = square();
        let mut ledger = RouteLedger::new(ids(&net, "o")[0], &net, 10.0, 3);
        ledger.offer(&ids(&net, "oq"), 4.0);
        assert_eq!(ledger.offer(&ids(&net, "oq"), 4.0), Admission::Duplicate);
        assert_eq!(ledger.entries().len(), 1);
    }

    #[test]
    fn window_applies_on_offer_and_finalize() {
        let net = square();
        let mut ledger = RouteLedger::new(ids(&net, "o")[0], &net, 10.0, 3);
        assert_eq!(ledger.offer(&ids(&net, "opq"), 20.0), Admission::Admitted);
        assert_eq!(ledger.offer(&ids(&net, "oq"), 4.0), Admission::Admitted);
        assert_eq!(ledger.offer(&ids(&net, "orq"), 14.5), Admission::OutsideWindow);
        assert_eq!(ledger.offer(&ids(&net, "oprq"), 14.0), Admission::Admitted);

        // 20 was admitted while 20 was the cheapest; finalize drops it.
        let set = ledger.finalize().unwrap();
        assert_eq!(set.costs(), vec![4.0, 14.0]);
        assert!(set.iter().all(|e| e.cost - set.shortest <= 10.0));
    }

    #[test]
    fn equal_cost_route_goes_ahead_of_older_ties() {
        let net = square();
        let mut ledger = RouteLedger::new(ids(&net, "o")[0], &net, 10.0, 3);
        ledger.offer(&ids(&net, "oq"), 8.0);
        ledger.offer(&ids(&net, "opq"), 10.0);
        ledger.offer(&ids(&net, "orq"), 10.0);
        ledger.offer(&ids(&net, "oprq"), 12.0);
        let set = ledger.finalize().unwrap();
        let routes: Vec<_> = set.iter().map(|e| e.stations.clone()).collect();
        assert_eq!(
            routes,
            vec![ids(&net, "oq"), ids(&net, "orq"), ids(&net, "opq"), ids(&net, "oprq")]
        );
    }

    #[test]
    fn tie_with_first_entry_is_kept_and_placed_first() {
        let net = square();
        let mut ledger = RouteLedger::new(ids(&net, "o")[0], &net, 10.0, 3);
        assert_eq!(ledger.offer(&ids(&net, "opq"), 10.0), Admission::Admitted);
        assert_eq!(ledger.offer(&ids(&net, "orq"), 10.0), Admission::Admitted);
        let set = ledger.finalize().unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.entries[0].stations, ids(&net, "orq"));
        assert_eq!(set.entries[1].stations, ids(&net, "opq"));
    }

    #[test]
    fn interchange_cap_enforced() {
        let net = square();
        let mut ledger = RouteLedger::new(ids(&net, "o")[0], &net, 10.0, 1);
        assert_eq!(ledger.interchanges_on(&ids(&net, "oprq")), 3);
        ledger.offer(&ids(&net, "oq"), 4.0);
        assert_eq!(ledger.offer(&ids(&net, "oprq"), 8.0), Admission::TooManyInterchanges);
        assert_eq!(ledger.offer(&ids(&net, "orq"), 7.0), Admission::TooManyInterchanges);
        assert_eq!(ledger.offer(&ids(&net, "opq"), 5.0), Admission::TooManyInterchanges);
    }

    #[test]
    fn finalize_drops_first_entry_over_cap() {
        let net = square();
        let mut ledger = RouteLedger::new(ids(&net, "o")[0], &net, 10.0, 1);
        assert_eq!(ledger.offer(&ids(&net, "oprq"), 8.0), Admission::Admitted);
        ledger.offer(&ids(&net, "oq"), 4.0);
        let set = ledger.finalize().unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.entries[0].stations, ids(&net, "oq"));
    }
}

// ── Flow ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod flow {
    use super::helpers::{ids, square};
    use crate::{
        EdgeFlowTable, FlowSplitter, KPathEntry, KPathSet, RouteError, attractiveness,
        split_proportions,
    };

    fn set(entries: Vec<KPathEntry>) -> KPathSet {
        let shortest = entries.iter().map(|e| e.cost).fold(f64::INFINITY, f64::min);
        KPathSet { entries, shortest }
    }

    #[test]
    fn attractiveness_peaks_at_shortest() {
        assert_eq!(attractiveness(7.0, 7.0), 1.0);
        assert!((attractiveness(12.0, 7.0) - (-2.0f64).exp()).abs() < 1e-12);
        assert!(attractiveness(9.0, 7.0) > attractiveness(10.0, 7.0));
    }

    #[test]
    fn single_path_takes_everything() {
        assert_eq!(split_proportions(&[12.0], 12.0), vec![1.0]);
        assert!(split_proportions(&[], 0.0).is_empty());
    }

    #[test]
    fn shares_exclude_own_weight() {
        let p = split_proportions(&[10.0, 10.0], 10.0);
        assert_eq!(p, vec![1.0, 1.0]);

        let p = split_proportions(&[10.0, 15.0], 10.0);
        let s2 = (-2.0f64).exp();
        assert!((p[0] - 1.0 / s2).abs() < 1e-9);
        assert!((p[1] - s2).abs() < 1e-12);
    }

    #[test]
    fn share_falls_as_cost_rises() {
        let mut last = f64::INFINITY;
        for c in [10.0, 11.0, 12.0, 14.0, 17.0, 20.0] {
            let p = split_proportions(&[10.0, 12.0, c], 10.0)[2];
            assert!(p < last, "share did not fall at cost {c}");
            last = p;
        }
    }

    #[test]
    fn table_has_one_zero_entry_per_directed_link() {
        let net = square();
        let table = EdgeFlowTable::new(&net);
        assert_eq!(table.len(), 12);
        assert_eq!(table.total(), 0.0);
        let [o, p] = [0, 1].map(|i| ids(&net, "op")[i]);
        assert_eq!(table.get(o, p), Some(0.0));
        assert_eq!(table.get(p, o), Some(0.0));
    }

    #[test]
    fn single_path_assigns_full_demand() {
        let net = square();
        let mut table = EdgeFlowTable::new(&net);
        let paths = set(vec![KPathEntry { stations: ids(&net, "opq"), cost: 5.0 }]);
        let volumes = FlowSplitter.assign(&paths, 100.0, &mut table).unwrap();
        assert_eq!(volumes, vec![100.0]);
        let v = ids(&net, "opq");
        assert_eq!(table.get(v[0], v[1]), Some(100.0));
        assert_eq!(table.get(v[1], v[2]), Some(100.0));
        assert_eq!(table.get(v[1], v[0]), Some(0.0), "direction matters");
        assert_eq!(table.total(), 200.0);
    }

    #[test]
    fn split_volume_matches_shares() {
        let net = square();
        let mut table = EdgeFlowTable::new(&net);
        let paths = set(vec![
            KPathEntry { stations: ids(&net, "oq"), cost: 4.0 },
            KPathEntry { stations: ids(&net, "opq"), cost: 5.0 },
            KPathEntry { stations: ids(&net, "orq"), cost: 7.0 },
        ]);
        let shares = FlowSplitter.shares(&paths);
        let volumes = FlowSplitter.assign(&paths, 50.0, &mut table).unwrap();

        let expected: f64 = 50.0 * shares.iter().sum::<f64>();
        assert!((volumes.iter().sum::<f64>() - expected).abs() < 1e-9);
        let v = ids(&net, "oq");
        assert!((table.get(v[0], v[1]).unwrap() - volumes[0]).abs() < 1e-12);
        // Edge-weighted total: 1 edge for oq, 2 each for the others.
        let edge_total = volumes[0] + 2.0 * volumes[1] + 2.0 * volumes[2];
        assert!((table.total() - edge_total).abs() < 1e-9);
    }

    #[test]
    fn unknown_edge_leaves_table_untouched() {
        let net = square();
        let mut table = EdgeFlowTable::new(&net);
        let o = ids(&net, "o")[0];
        let paths = set(vec![
            KPathEntry { stations: ids(&net, "oq"), cost: 3.0 },
            KPathEntry { stations: vec![o, kp_core::StationId(99)], cost: 4.0 },
        ]);
        let err = FlowSplitter.assign(&paths, 10.0, &mut table).unwrap_err();
        assert!(matches!(err, RouteError::UnknownEdge { .. }));
        assert_eq!(table.total(), 0.0);
    }

    #[test]
    fn merge_adds_entrywise() {
        let net = square();
        let v = ids(&net, "op");
        let mut a = EdgeFlowTable::new(&net);
        let mut b = EdgeFlowTable::new(&net);
        a.add(v[0], v[1], 1.5).unwrap();
        b.add(v[0], v[1], 2.0).unwrap();
        b.add(v[1], v[0], 3.0).unwrap();
        a.merge(&b).unwrap();
        assert_eq!(a.get(v[0], v[1]), Some(3.5));
        assert_eq!(a.get(v[1], v[0]), Some(3.0));
    }
}

// ── Demand ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod demand {
    use std::io::{Cursor, Write};

    use super::helpers::{ids, square};
    use crate::{RouteError, load_demand_csv, load_demand_reader};

    #[test]
    fn loads_in_file_order() {
        let net = square();
        let csv = "origin,destination,passengers\nq,o,7\n o , p , 12\n";
        let table = load_demand_reader(Cursor::new(csv), &net).unwrap();
        assert_eq!(table.len(), 2);
        let first = table.iter().next().unwrap();
        assert_eq!(first.label(&net), "qo");
        let [o, p] = [0, 1].map(|i| ids(&net, "op")[i]);
        assert_eq!(table.get(o, p), Some(12));
        assert_eq!(table.total(), 19);
    }

    #[test]
    fn unknown_label_rejected() {
        let net = square();
        let csv = "origin,destination,passengers\no,z,1\n";
        let err = load_demand_reader(Cursor::new(csv), &net).unwrap_err();
        assert!(matches!(err, RouteError::Demand { row: 1, .. }));
    }

    #[test]
    fn self_pair_and_duplicate_rejected() {
        let net = square();
        let same = "origin,destination,passengers\no,o,1\n";
        assert!(matches!(
            load_demand_reader(Cursor::new(same), &net),
            Err(RouteError::Demand { .. })
        ));
        let dup = "origin,destination,passengers\no,p,1\no,p,2\n";
        assert!(matches!(
            load_demand_reader(Cursor::new(dup), &net),
            Err(RouteError::Demand { row: 2, .. })
        ));
    }

    #[test]
    fn bad_number_is_csv_error() {
        let net = square();
        let csv = "origin,destination,passengers\no,p,many\n";
        assert!(matches!(load_demand_reader(Cursor::new(csv), &net), Err(RouteError::Csv(_))));
    }

    #[test]
    fn load_from_file_and_retain() {
        let net = square();
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "origin,destination,passengers").unwrap();
        writeln!(f, "o,p,3").unwrap();
        writeln!(f, "p,o,4").unwrap();
        let mut table = load_demand_csv(f.path(), &net).unwrap();
        let o = ids(&net, "o")[0];
        table.retain(|d| d.origin == o);
        assert_eq!(table.len(), 1);
        assert_eq!(table.total(), 3);
    }
}
