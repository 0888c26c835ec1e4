use crate::logic::scoring::score_climate;
use crate::models::{
    ActivityKind, ClimateAggregate, ClimateOverview, CropAssessment, RecommendationSet,
    TimelineEntry,
};

pub fn print_recommendations(
    climate: &ClimateAggregate,
    lookback_years: usize,
    set: &RecommendationSet,
) {
    println!("Recommendations for {}", climate.month);
    println!(
        "  Climate ({}-year window, {} samples): {:.1} mm rainfall, {:.1}°C",
        lookback_years, climate.sample_years, climate.avg_rainfall, climate.avg_temperature
    );
    if climate.has_data() {
        println!(
            "  {} season, climate score {:.0}/10",
            climate.month.season(),
            score_climate(climate.avg_rainfall, climate.avg_temperature, climate.month)
        );
    } else {
        println!("  No historical data available for this month.");
    }
    println!();

    if set.is_empty() {
        println!("No crop is viable for this month under the recent climate.");
        return;
    }

    for (category, recs) in set.iter() {
        println!("{}", category);
        for rec in recs {
            println!(
                "  {:<22} {:>4.2}/5 ({:.1}★)  {:<8}  water: {:<9} {}",
                rec.crop.display_name,
                rec.suitability,
                rec.stars(),
                rec.phase.as_str(),
                rec.crop.water_demand.as_str(),
                rec.crop.duration
            );
            for benefit in &rec.crop.benefits {
                println!("      - {}", benefit);
            }
        }
        println!();
    }
}

pub fn print_assessment(assessment: &CropAssessment) {
    let climate = &assessment.climate;
    println!("{} in {}", assessment.crop_id, assessment.month);
    println!(
        "  Climate ({} samples): {:.1} mm rainfall, {:.1}°C",
        climate.sample_years, climate.avg_rainfall, climate.avg_temperature
    );

    match (&assessment.recommendation, assessment.rejection) {
        (Some(rec), _) => {
            println!(
                "  Recommended for {}: {:.2}/5 ({:.1}★)",
                rec.phase.as_str().to_lowercase(),
                rec.suitability,
                rec.stars()
            );
            println!(
                "  Tolerates {} mm and {}°C",
                rec.crop.rainfall_mm, rec.crop.temperature_c
            );
        }
        (None, Some(reason)) => println!("  Not recommended: {}", reason),
        (None, None) => println!("  Not recommended"),
    }
}

pub fn print_overview(overview: &ClimateOverview) {
    println!(
        "Climate overview ({}-year window)",
        overview.lookback_years
    );
    println!();
    println!("  Month      Rain (mm)   Temp (°C)   Years");
    for m in &overview.months {
        println!(
            "  {:<9}  {:>9.1}   {:>9.1}   {:>5}",
            m.month.abbrev(),
            m.avg_rainfall,
            m.avg_temperature,
            m.sample_years
        );
    }
    println!();
    println!("  Annual rainfall:   {:.0} mm", overview.annual_rainfall);
    match overview.wettest_month {
        Some(month) => println!("  Wettest month:     {}", month),
        None => println!("  Wettest month:     n/a"),
    }
    println!("  Mean temperature:  {:.1}°C", overview.mean_temperature);
    println!();
    println!(
        "  {} ({} season): climate score {:.0}/10",
        overview.target.month, overview.target_season, overview.climate_score
    );
}

pub fn print_timeline(timeline: &[TimelineEntry]) {
    println!("Rotation calendar");
    println!();
    for entry in timeline {
        let labels: Vec<String> = entry
            .activities
            .iter()
            .map(|a| format!("{} {}", a.kind.symbol(), a.label))
            .collect();
        println!("  {:<4} {}", entry.month.abbrev(), labels.join(", "));
    }
    println!();

    let plantings: usize = timeline.iter().map(|e| e.count(ActivityKind::Plant)).sum();
    let harvests: usize = timeline.iter().map(|e| e.count(ActivityKind::Harvest)).sum();
    let idle = timeline.iter().filter(|e| e.is_idle()).count();
    println!(
        "  {} plantings, {} harvests, {} idle months",
        plantings, harvests, idle
    );
    println!();
    println!(
        "  {} {}  {} {}  {} {}  {} {}",
        ActivityKind::Plant.symbol(),
        ActivityKind::Plant,
        ActivityKind::Harvest.symbol(),
        ActivityKind::Harvest,
        ActivityKind::StructuralMaintenance.symbol(),
        ActivityKind::StructuralMaintenance,
        ActivityKind::Idle.symbol(),
        ActivityKind::Idle
    );
}
