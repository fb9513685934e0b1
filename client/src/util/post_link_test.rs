use super::*;

#[test]
fn form_carries_only_the_csrf_field() {
    let fields = hidden_fields("tok-123");
    assert_eq!(fields, vec![("csrfmiddlewaretoken", "tok-123".to_owned())]);
}

