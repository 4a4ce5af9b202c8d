use recordset::collection::RecordCollection;
use recordset::error::CollectionError;
use recordset::mask::Mask;
use recordset::processing::{ApplyOptions, KeyedApply, ReduceOp};
use recordset::record;
use recordset::series::ColumnView;
use recordset::types::Value;

fn abx() -> RecordCollection {
    RecordCollection::new(vec![
        record! { "a" => 1 },
        record! { "b" => 2 },
        record! { "b" => 3, "x" => 4 },
    ])
}

fn mixed() -> RecordCollection {
    RecordCollection::new(vec![
        record! { "a" => 1, "c" => "one" },
        record! { "a" => 2.5, "c" => Value::Null },
        record! { "a" => "two", "c" => true },
        record! { "a" => vec![Value::Int64(1)], "c" => 2 },
        record! { "b" => record! { "nested" => 1 }, "c" => 3 },
        record! { "c" => 3 },
    ])
}

#[test]
fn projection_of_missing_field_fills_with_default() {
    let c = abx();
    assert_eq!(c.get("nope").values(), &[Value::Null, Value::Null, Value::Null]);

    let c = RecordCollection::with_default(abx().into_records(), -1);
    assert_eq!(
        c.get("nope").values(),
        &[Value::Int64(-1), Value::Int64(-1), Value::Int64(-1)]
    );
}

#[test]
fn project_a_gives_value_then_defaults() {
    assert_eq!(
        abx().get("a").values(),
        &[Value::Int64(1), Value::Null, Value::Null]
    );
}

#[test]
fn only_one_record_has_b_greater_than_two() {
    assert_eq!(abx().get("b").gt(2).count(), 1);
}

#[test]
fn where_a_equals_one_selects_one_record() {
    let c = abx();
    let picked = c.where_mask(&c.get("a").equal(1)).unwrap();
    assert_eq!(picked.len(), 1);
    assert_eq!(picked[0], record! { "a" => 1 });
}

#[test]
fn kapply_increments_a_and_leaves_other_records_alone() {
    let c = abx();
    let out = c
        .kapply(
            &KeyedApply::new().field("a", |a| a.try_add(&Value::Int64(1))),
            &ApplyOptions::default(),
        )
        .unwrap();

    assert_eq!(out[0], record! { "a" => 2 });
    assert_eq!(out[1], c[1]);
    assert_eq!(out[2], c[2]);
}

#[test]
fn caseless_and_membership_on_strings_and_numbers() {
    let s = ColumnView::new(vec![Value::from("Hi"), Value::from("hi"), Value::Int64(10)]);
    let members = [Value::from("hi"), Value::Int64(10)];

    assert_eq!(s.caseless_eq("HI").count(), 2);
    assert_eq!(s.is_in(members.clone(), true).count(), 2);
    assert_eq!(s.is_in(members, false).count(), 3);
}

#[test]
fn where_keeps_exactly_the_true_entries_in_order() {
    let c = mixed();
    let mask = Mask::new(vec![false, true, false, true, true, false]);
    let picked = c.where_mask(&mask).unwrap();

    assert_eq!(picked.len(), mask.count());
    let expected: Vec<_> = mask.true_indices().into_iter().map(|i| c[i].clone()).collect();
    assert_eq!(picked.records(), expected.as_slice());
}

#[test]
fn where_with_full_masks() {
    let c = mixed();
    assert_eq!(c.where_mask(&Mask::full(c.len(), true)).unwrap(), c);
    assert!(c.where_mask(&Mask::full(c.len(), false)).unwrap().is_empty());
}

#[test]
fn subtracting_a_mask_equals_selecting_its_complement() {
    let c = mixed();
    for mask in [
        c.get("c").gt_eq(2),
        c.get("a").is_null(),
        Mask::full(c.len(), false),
        Mask::full(c.len(), true),
    ] {
        assert_eq!(&c - &mask, c.where_mask(&!&mask).unwrap());
    }
}

#[test]
fn comparisons_never_fail_on_mixed_columns() {
    let c = mixed();
    let column = c.get("a");
    let references = [
        Value::Int64(1),
        Value::Float64(1.5),
        Value::from("two"),
        Value::Bool(true),
        Value::Null,
        Value::List(vec![Value::Int64(1)]),
        Value::Map(record! { "nested" => 1 }),
    ];

    for r in references {
        for mask in [
            column.gt(r.clone()),
            column.gt_eq(r.clone()),
            column.lt(r.clone()),
            column.lt_eq(r.clone()),
            column.equal(r.clone()),
            column.not_equal(r.clone()),
            column.is_identical(r.clone()),
            column.caseless_eq(r.clone()),
        ] {
            assert_eq!(mask.len(), c.len());
        }
    }

    // Ordering only holds between comparable values.
    assert_eq!(column.gt(2).as_slice(), &[false, true, false, false, false, false]);
    assert_eq!(column.lt("z").as_slice(), &[false, false, true, false, false, false]);
}

#[test]
fn broadcast_set_writes_every_record() {
    let mut c = abx();
    c.set("e", Value::from("same")).unwrap();
    assert_eq!(c.get("e").values(), vec![Value::from("same"); c.len()].as_slice());
}

#[test]
fn sequence_set_with_wrong_length_leaves_collection_unchanged() {
    let mut c = abx();
    let before = c.clone();

    let err = c
        .set("e", vec![Value::Int64(1), Value::Int64(2)])
        .unwrap_err();
    assert!(matches!(
        err,
        CollectionError::LengthMismatch {
            expected: 3,
            actual: 2
        }
    ));
    assert_eq!(c, before);
}

#[test]
fn column_view_can_be_assigned_back() {
    let mut c = abx();
    let doubled: ColumnView = c
        .get("b")
        .iter()
        .map(|v| v.try_add(v).unwrap_or(Value::Null))
        .collect();
    c.set("b2", doubled).unwrap();
    assert_eq!(
        c.get("b2").values(),
        &[Value::Null, Value::Int64(4), Value::Int64(6)]
    );
}

#[test]
fn sum_ignores_missing_and_non_numeric_values() {
    let c = RecordCollection::new(vec![
        record! { "a" => 1 },
        record! { "b" => 2 },
        record! { "c" => "nope" },
        record! { "c" => 2 },
        record! { "c" => 3 },
        record! { "c" => 3 },
    ]);
    assert_eq!(c.get("c").reduce(ReduceOp::Sum), Value::Int64(8));
}

#[test]
fn concatenation_and_difference_round_trip() {
    let c = abx();
    let extra = record! { "y" => 9 };

    let grown = &c + extra.clone();
    assert_eq!(grown.len(), 4);
    assert!(grown.contains(&extra));

    let shrunk = &grown - &vec![extra.clone()];
    assert_eq!(shrunk, c);

    // Removing by identity only drops the referenced record object.
    let copies = &c + &c;
    let first = &copies[0];
    let without_first = &copies - first;
    assert_eq!(without_first.len(), 5);
    assert!(without_first.contains(first));
}
