use demography::aggregate::{AgeRange, AggregateError, Aggregator, FilterParams, Gender};
use demography::data::{CustomerRecord, Dataset, ProvinceCoordinate};
use rstest::{fixture, rstest};
use std::collections::HashSet;

fn scenario() -> Dataset {
    Dataset::from_records(
        &[
            CustomerRecord::new("Engineer", "Jakarta", "Male", 30, "Millennial"),
            CustomerRecord::new("Engineer", "Jakarta", "Female", 45, "Gen X"),
            CustomerRecord::new("Teacher", "Bali", "Male", 25, "Gen Z"),
        ],
        &[ProvinceCoordinate::new("Jakarta", -6.2, 106.8)],
    )
    .unwrap()
}

#[fixture]
fn survey() -> Dataset {
    let professions = ["Doctor", "Engineer", "Lawyer", "Teacher"];
    let provinces = ["Aceh", "Bali", "Jakarta", "Papua", "Riau"];
    let generations = ["Boomer", "Gen X", "Millennial", "Gen Z"];

    let records: Vec<CustomerRecord> = (0..200u32)
        .map(|i| {
            let age = 18 + (i * 7) % 55;
            let generation = match age {
                0..=28 => generations[3],
                29..=44 => generations[2],
                45..=60 => generations[1],
                _ => generations[0],
            };
            CustomerRecord::new(
                professions[(i as usize * 3) % professions.len()],
                provinces[(i as usize * 5 + i as usize / 7) % provinces.len()],
                if i % 3 == 0 { "Female" } else { "Male" },
                age,
                generation,
            )
        })
        .collect();

    Dataset::from_records(
        &records,
        &[
            ProvinceCoordinate::new("Aceh", 4.7, 96.7),
            ProvinceCoordinate::new("Bali", -8.4, 115.2),
            ProvinceCoordinate::new("Jakarta", -6.2, 106.8),
            ProvinceCoordinate::new("Riau", 0.3, 101.7),
        ],
    )
    .unwrap()
}

fn ages(dataset: &Dataset) -> Vec<u32> {
    dataset
        .customers()
        .column("age")
        .unwrap()
        .i64()
        .unwrap()
        .into_iter()
        .map(|age| age.unwrap() as u32)
        .collect()
}

#[test]
fn scenario_profession_counts_ascend() {
    let dataset = scenario();
    let table = Aggregator::profession_counts(dataset.customers()).unwrap();
    let rows: Vec<(&str, u64)> = table
        .rows()
        .iter()
        .map(|r| (r.profession.as_str(), r.count))
        .collect();
    assert_eq!(rows, [("Teacher", 1), ("Engineer", 2)]);
}

#[test]
fn scenario_geography_drops_bali() {
    let dataset = scenario();
    let table = Aggregator::province_geography(dataset.customers(), dataset.coordinates()).unwrap();

    assert_eq!(table.len(), 1);
    let jakarta = &table.rows()[0];
    assert_eq!(jakarta.province, "Jakarta");
    assert_eq!(jakarta.male_count, 1);
    assert_eq!(jakarta.female_count, 1);
    assert_eq!(jakarta.total_count, 2);
    assert_eq!(jakarta.latitude, -6.2);
    assert_eq!(jakarta.longitude, 106.8);
    assert_eq!(table.dropped_provinces(), ["Bali"]);
}

#[test]
fn scenario_generations_for_engineer() {
    let dataset = scenario();
    let table = Aggregator::generation_counts(dataset.customers(), "Engineer").unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.get("Millennial"), Some(1));
    assert_eq!(table.get("Gen X"), Some(1));
    assert_eq!(table.get("Gen Z"), None);
}

#[test]
fn scenario_gender_counts_by_age() {
    let dataset = scenario();

    let wide = Aggregator::profession_gender_counts(dataset.customers(), 20, 50).unwrap();
    assert_eq!(wide.total(), 3);
    assert_eq!(wide.get("Engineer", Gender::Male), Some(1));
    assert_eq!(wide.get("Engineer", Gender::Female), Some(1));
    assert_eq!(wide.get("Teacher", Gender::Male), Some(1));
    assert_eq!(wide.get("Teacher", Gender::Female), None);
    let order: Vec<(&str, Gender, u64)> = wide
        .rows()
        .iter()
        .map(|r| (r.profession.as_str(), r.gender, r.count))
        .collect();
    assert_eq!(
        order,
        [
            ("Engineer", Gender::Female, 1),
            ("Engineer", Gender::Male, 1),
            ("Teacher", Gender::Male, 1),
        ]
    );

    let narrow = Aggregator::profession_gender_counts(dataset.customers(), 40, 50).unwrap();
    let rows: Vec<(&str, Gender, u64)> = narrow
        .rows()
        .iter()
        .map(|r| (r.profession.as_str(), r.gender, r.count))
        .collect();
    assert_eq!(rows, [("Engineer", Gender::Female, 1)]);
}

#[test]
fn scenario_empty_range_is_not_an_error() {
    let dataset = scenario();
    let table = Aggregator::profession_gender_counts(dataset.customers(), 60, 70).unwrap();
    assert!(table.is_empty());
}

#[rstest]
fn aggregations_are_idempotent(survey: Dataset) {
    let params = FilterParams::new("Lawyer", AgeRange { min: 25, max: 60 });
    let first = Aggregator::compute_snapshot(&survey, &params).unwrap();
    let second = Aggregator::compute_snapshot(&survey, &params).unwrap();
    assert_eq!(first, second);
}

#[rstest]
fn profession_counts_partition_customers(survey: Dataset) {
    let table = Aggregator::profession_counts(survey.customers()).unwrap();
    assert_eq!(table.total(), survey.len() as u64);
    assert!(table.rows().windows(2).all(|w| w[0].count <= w[1].count));
}

#[rstest]
fn geography_zero_fills_and_joins_safely(survey: Dataset) {
    let table = Aggregator::province_geography(survey.customers(), survey.coordinates()).unwrap();
    let with_coordinates: HashSet<&str> = ["Aceh", "Bali", "Jakarta", "Riau"].into_iter().collect();

    for row in table.rows() {
        assert_eq!(row.male_count + row.female_count, row.total_count);
        assert!(with_coordinates.contains(row.province.as_str()));
        assert!(row.latitude.is_finite() && row.longitude.is_finite());
    }
    assert_eq!(table.dropped_provinces(), ["Papua"]);
    assert_eq!(
        table.total() + table.dropped_customers(),
        survey.len() as u64
    );
}

#[rstest]
fn filtered_tables_never_hold_zero_counts(survey: Dataset) {
    for profession in survey.professions() {
        let table = Aggregator::generation_counts(survey.customers(), profession).unwrap();
        assert!(table.rows().iter().all(|r| r.count > 0));
    }
    let table = Aggregator::profession_gender_counts(survey.customers(), 18, 72).unwrap();
    assert!(table.rows().iter().all(|r| r.count > 0));
}

#[rstest]
#[case(18, 72)]
#[case(20, 50)]
#[case(30, 30)]
#[case(45, 60)]
#[case(71, 90)]
fn range_filter_counts_match_source(survey: Dataset, #[case] min: u32, #[case] max: u32) {
    let expected = ages(&survey)
        .into_iter()
        .filter(|age| (min..=max).contains(age))
        .count() as u64;

    let table = Aggregator::profession_gender_counts(survey.customers(), min, max).unwrap();
    assert_eq!(table.total(), expected);
    assert_eq!(table.age_range(), AgeRange { min, max });
    assert!(table.rows().windows(2).all(|w| w[0].count <= w[1].count));
}

#[rstest]
fn snapshot_rejects_out_of_range_selection(survey: Dataset) {
    let bounds = survey.age_bounds().unwrap();
    let params = FilterParams::new(
        "Doctor",
        AgeRange {
            min: bounds.min,
            max: bounds.max + 1,
        },
    );
    assert!(matches!(
        Aggregator::compute_snapshot(&survey, &params),
        Err(AggregateError::InvalidParameter(_))
    ));
}

#[test]
fn snapshot_surfaces_unexpected_gender() {
    let dataset = Dataset::from_records(
        &[
            CustomerRecord::new("Engineer", "Jakarta", "Male", 30, "Millennial"),
            CustomerRecord::new("Engineer", "Jakarta", "Nonbinary", 31, "Millennial"),
        ],
        &[ProvinceCoordinate::new("Jakarta", -6.2, 106.8)],
    )
    .unwrap();
    let params = FilterParams::new("Engineer", AgeRange { min: 30, max: 31 });
    assert!(matches!(
        Aggregator::compute_snapshot(&dataset, &params),
        Err(AggregateError::DataValidation(_))
    ));
}
