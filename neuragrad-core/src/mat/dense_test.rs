use super::*;

#[test]
fn test_new_checks_data_length() {
    let ok = Dense::new(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    assert!(ok.is_ok());
    let err = Dense::new(2, 3, vec![1.0, 2.0]);
    assert!(matches!(
        err,
        Err(NeuraGradError::MatrixCreationError {
            data_len: 2,
            rows: 2,
            cols: 3
        })
    ));
}

#[test]
fn test_vector_and_scalar_shapes() {
    let v = Dense::new_vec(vec![1.0, 2.0, 3.0]);
    assert_eq!(v.dims(), (3, 1));
    assert!(v.is_vector());
    assert!(!v.is_scalar());

    let s = Dense::new_scalar(4.5);
    assert!(s.is_scalar());
    assert_eq!(s.scalar().unwrap(), 4.5);
    assert!(matches!(v.scalar(), Err(NeuraGradError::NotScalar { .. })));
}

#[test]
fn test_compatibility_rules() {
    let col = Dense::new_vec(vec![1.0, 2.0, 3.0]);
    let row = Dense::new(1, 3, vec![1.0, 2.0, 3.0]).unwrap();
    let other = Dense::new_vec(vec![1.0, 2.0]);
    let m = Dense::zeros(3, 3);

    assert!(col.compatible(&row));
    assert!(!col.same_dims(&row));
    assert!(col.vectors_of_same_size(&row));
    assert!(!col.compatible(&other));
    assert!(!col.compatible(&m));
    assert!(m.compatible(&Dense::ones(3, 3)));
}

#[test]
fn test_accessors() {
    let m = Dense::new(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    assert_eq!(m.at(1, 0), 3.0);
    assert_eq!(m.at_vec(3).unwrap(), 4.0);
    assert!(matches!(
        m.at_vec(4),
        Err(NeuraGradError::IndexOutOfBounds { index: 4, len: 4 })
    ));
    assert_eq!(m.row(1).unwrap().data(), &[3.0, 4.0]);
    assert_eq!(m.size(), 4);
    assert_eq!(m.zeros_like().data(), &[0.0; 4]);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn test_at_out_of_bounds_panics() {
    let m = Dense::zeros(2, 2);
    let _ = m.at(2, 0);
}
