//! End-to-end properties of the load → sizing → recommendation → optimizer chain.

mod common;

use solar_size::SizingError;
use solar_size::catalog::{CITIES, PANELS, Priority};
use solar_size::config::SiteConfig;
use solar_size::estimate::Estimator;
use solar_size::load::calculate_consumption;
use solar_size::optimizer::{ScenarioTier, optimize};
use solar_size::recommend::{best_option, recommend_panels};
use solar_size::sizing::size_system;

#[test]
fn consumption_scales_with_quantity() {
    let single = common::catalog_set(&[("Ceiling Fan", 1), ("LED Bulb (12W)", 1)]);
    let triple = common::catalog_set(&[("Ceiling Fan", 3), ("LED Bulb (12W)", 3)]);

    let a = single.profile().unwrap();
    let b = triple.profile().unwrap();
    assert!(common::approx(b.total_daily_kwh, 3.0 * a.total_daily_kwh));
    assert!(common::approx(b.total_watts, 3.0 * a.total_watts));
    // fan 75 W * 12 h + bulb 12 W * 8 h
    assert!(common::approx(a.total_daily_kwh, 0.996));
}

#[test]
fn empty_and_zero_quantity_sets_have_no_demand() {
    let empty = calculate_consumption(&solar_size::load::WorkingSet::new()).unwrap();
    assert_eq!(empty.total_daily_kwh, 0.0);

    let zero = common::catalog_set(&[("Iron", 0), ("Laptop", 0)]);
    assert_eq!(zero.profile().unwrap().total_watts, 0.0);
}

#[test]
fn sizing_grows_with_demand_and_shrinks_with_sun() {
    let mut last_kwp = -1.0;
    for demand in [0.0, 1.5, 4.0, 12.0, 40.0] {
        let r = size_system(demand, 4.5, 2).unwrap();
        assert!(r.required_kwp > last_kwp);
        assert!(common::approx(r.battery_kwh, demand * 2.0));
        last_kwp = r.required_kwp;
    }

    let sunny = size_system(10.0, 6.0, 1).unwrap();
    let cloudy = size_system(10.0, 4.2, 1).unwrap();
    assert!(sunny.required_kwp < cloudy.required_kwp);
}

#[test]
fn every_city_sizes_with_its_own_irradiance() {
    let sizer = common::strict_sizer();
    for city in CITIES {
        let (resolved, r) = sizer.size(8.5, city.name, 1).unwrap();
        assert!(!resolved.is_fallback);
        assert_eq!(r.irradiance_used, city.irradiance);
    }
}

#[test]
fn unknown_city_follows_policy() {
    let (resolved, r) = common::default_sizer().size(8.5, "Ogbomosho", 1).unwrap();
    assert!(resolved.is_fallback);
    assert_eq!(r.irradiance_used, 5.0);
    assert!(common::approx(r.required_kwp, 2.0));

    let err = common::strict_sizer().size(8.5, "Ogbomosho", 1).unwrap_err();
    assert_eq!(err, SizingError::UnknownLocation("Ogbomosho".to_string()));
}

#[test]
fn recommendations_cover_requirement_with_fewest_panels() {
    for required in [0.3, 1.0, 2.35, 4.0, 7.77] {
        let rows = recommend_panels(required, PANELS).unwrap();
        assert_eq!(rows.len(), PANELS.len());
        for r in &rows {
            let watts = r.panel_count as f64 * r.panel.watt_rating;
            assert!(watts + 1e-6 >= required * 1000.0, "{} undersized", r.panel.name);
            assert!(
                watts - r.panel.watt_rating < required * 1000.0,
                "{} has a spare panel",
                r.panel.name
            );
            assert!(common::approx(r.total_cost, r.panel_count as f64 * r.panel.unit_price));
        }
        assert!(rows.windows(2).all(|w| w[0].cost_per_watt <= w[1].cost_per_watt));
        assert_eq!(best_option(&rows).map(|r| r.panel.name), Some(rows[0].panel.name));
    }
}

#[test]
fn optimizer_tiers_are_nested_and_budget_is_respected() {
    let set = common::tiered_set();
    let sizer = common::default_sizer();
    let pricing = common::default_pricing();

    let mut last_kwh = 0.0;
    for budget in [0.0, 2_000_000.0, 4_000_000.0, 8_000_000.0, 1e9] {
        let report = optimize(&set, &sizer, "Lagos", 2, budget, &pricing).unwrap();
        let kwh: Vec<f64> = report.outcomes.iter().map(|o| o.daily_kwh).collect();
        assert!(kwh[0] <= kwh[1] && kwh[1] <= kwh[2]);

        for o in &report.outcomes {
            assert_eq!(o.within_budget, o.cost.total_cost <= budget);
        }

        let chosen = report.recommended_outcome().map_or(0.0, |o| o.daily_kwh);
        assert!(chosen >= last_kwh, "more budget never buys less capability");
        if let Some(best) = report.recommended_outcome() {
            assert!(best.within_budget);
            // nothing affordable delivers more energy
            assert!(
                report
                    .outcomes
                    .iter()
                    .filter(|o| o.within_budget)
                    .all(|o| o.daily_kwh <= best.daily_kwh)
            );
        }
        last_kwh = chosen;
    }
}

#[test]
fn removed_appliances_never_reach_a_scenario() {
    let mut set = common::tiered_set();
    set.set_priority("Air Conditioner (1HP)", Priority::Remove).unwrap();
    let report = optimize(
        &set,
        &common::default_sizer(),
        "Kano",
        1,
        1e9,
        &common::default_pricing(),
    )
    .unwrap();
    let all = report.outcome(ScenarioTier::AllAppliances).unwrap();
    assert_eq!(all.appliance_count, 2);
    assert!(common::approx(all.daily_kwh, 4.8));
}

#[test]
fn custom_appliances_join_the_estimate() {
    let mut set = common::catalog_set(&[("Laptop", 1)]);
    set.add_custom(common::custom_entry("Sewing Machine", 100.0, 5.0)).unwrap();
    let dup = set.add_custom(common::custom_entry("Sewing Machine", 90.0, 2.0));
    assert_eq!(dup, Err(SizingError::DuplicateAppliance("Sewing Machine".to_string())));

    let est = Estimator::from_config(&SiteConfig::default()).estimate(&set).unwrap();
    // 65 W * 8 h + 100 W * 5 h
    assert!(common::approx(est.load.total_daily_kwh, 1.02));
    assert_eq!(est.breakdown.len(), 2);
}

#[test]
fn preset_estimate_is_consistent() {
    let cfg = SiteConfig::family_home();
    let set = cfg.working_set().unwrap();
    let estimator = Estimator::from_config(&cfg);
    let est = estimator.estimate(&set).unwrap();

    assert_eq!(est.location.name, "Abuja");
    assert_eq!(est.sizing.irradiance_used, 5.2);
    assert!(common::approx(
        est.sizing.required_kwp,
        est.load.total_daily_kwh / (5.2 * 0.85)
    ));

    let c = est.cost;
    assert!(common::approx(
        c.total_cost,
        c.panel_cost + c.inverter_cost + c.battery_cost + c.installation_cost
    ));
    let best = est.best_panel.unwrap();
    assert!(best.total_capacity_kw + 1e-9 >= est.sizing.required_kwp);

    let report = estimator.optimize(&set).unwrap();
    assert_eq!(report.outcomes.len(), 3);
    let all = report.outcome(ScenarioTier::AllAppliances).unwrap();
    assert!(common::approx(all.daily_kwh, est.load.total_daily_kwh));
}
