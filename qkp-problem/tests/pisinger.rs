use qkp_problem::{parse_instance, render_instance, Instance};

const SAMPLE: &str = "n 3\nc 10\nz 25\ntime 0.00\n1,10,5,0\n2,15,5,1\n3,7,3,0\n";

#[test]
fn test_parse_sample() {
    let instance = parse_instance(SAMPLE).unwrap();
    assert_eq!(instance.values, vec![10, 15, 7]);
    assert_eq!(instance.weights, vec![5, 5, 3]);
    assert_eq!(instance.capacity, 10);
    assert_eq!(instance.optimum, Some(25));
}

#[test]
fn test_parse_skips_labels_blanks_and_unknown_keys() {
    let text = "knapPI_1_2_100_1\n\nn 2\nc 6\ng 500\ntime 0.12\n\n1,4,3,0\n2,5,3,0\n";
    let instance = parse_instance(text).unwrap();
    assert_eq!(instance.values, vec![4, 5]);
    assert_eq!(instance.weights, vec![3, 3]);
    assert_eq!(instance.capacity, 6);
    assert_eq!(instance.optimum, None);
}

#[test]
fn test_parse_requires_item_count_header() {
    let e = parse_instance("c 10\n1,2,3,0\n").unwrap_err();
    assert!(e.to_string().contains("'n'"));
}

#[test]
fn test_parse_requires_capacity_header() {
    let e = parse_instance("n 1\n1,2,3,0\n").unwrap_err();
    assert!(e.to_string().contains("'c'"));
}

#[test]
fn test_parse_rejects_count_mismatch() {
    let e = parse_instance("n 3\nc 10\n1,2,3,0\n2,4,5,0\n").unwrap_err();
    assert!(e.to_string().contains("declares 3 items"));
}

#[test]
fn test_parse_rejects_short_item_line() {
    assert!(parse_instance("n 1\nc 10\n1,2\n").is_err());
}

#[test]
fn test_parse_rejects_non_numeric_fields() {
    assert!(parse_instance("n 1\nc 10\n1,x,3,0\n").is_err());
    assert!(parse_instance("n 1\nc ten\n1,2,3,0\n").is_err());
}

#[test]
fn test_render_parse_round_trip() {
    let with_optimum = Instance {
        values: vec![9, 4, 11],
        weights: vec![2, 1, 6],
        capacity: 7,
        optimum: Some(20),
    };
    assert_eq!(parse_instance(&render_instance(&with_optimum)).unwrap(), with_optimum);

    let without_optimum = Instance {
        optimum: None,
        ..with_optimum
    };
    assert_eq!(
        parse_instance(&render_instance(&without_optimum)).unwrap(),
        without_optimum
    );
}

#[test]
fn test_render_matches_published_layout() {
    let instance = Instance {
        values: vec![10],
        weights: vec![5],
        capacity: 5,
        optimum: Some(10),
    };
    assert_eq!(render_instance(&instance), "n 1\nc 5\nz 10\ntime 0.00\n1,10,5,0\n");
}
