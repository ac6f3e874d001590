//! Dispatch and merge behavior of routing trees.

mod common;

use std::io;
use std::thread;

use http::header::{HeaderName, ETAG, LOCATION};
use http::StatusCode;

use common::{failing_route, response, BrokenResponse, Recorder};
use response_router::routing::{
    any_series, any_status, dispatch, header, on, pass, series, status, Dispatch, Merge, Route,
    RouteError, Series,
};
use response_router::MessageReader;

fn execute(route: &Route, status: StatusCode) -> Result<(), RouteError> {
    route.execute(&mut response(status), &MessageReader::default())
}

#[test]
fn test_should_use_attribute_route() {
    let expected = Recorder::new();
    let other = Recorder::new();
    let tree = dispatch(
        status(),
        [
            on(StatusCode::OK).call(expected.route()),
            on(StatusCode::CREATED).call(other.route()),
        ],
    )
    .unwrap();

    tree.execute(&mut response(StatusCode::OK), &MessageReader::default())
        .unwrap();

    assert_eq!(expected.hits(), 1);
    assert!(!other.was_called());
}

#[test]
fn test_should_use_wildcard_route() {
    let expected = Recorder::new();
    let other = Recorder::new();
    let tree = dispatch(
        status(),
        [
            on(StatusCode::OK).call(other.route()),
            any_status().call(expected.route()),
        ],
    )
    .unwrap();

    tree.execute(&mut response(StatusCode::NOT_FOUND), &MessageReader::default())
        .unwrap();

    assert_eq!(expected.hits(), 1);
    assert!(!other.was_called());
}

#[test]
fn test_should_fail_when_no_route_matches() {
    let tree = dispatch(
        status(),
        [
            on(StatusCode::OK).call(pass()),
            on(StatusCode::CREATED).call(pass()),
        ],
    )
    .unwrap();

    let err = tree
        .execute(&mut response(StatusCode::NOT_FOUND), &MessageReader::default())
        .unwrap_err();

    match err {
        RouteError::NoRouteMatched(err) => {
            assert_eq!(err.attribute, format!("{:?}", StatusCode::NOT_FOUND));
            assert_eq!(
                err.declared,
                vec![
                    format!("{:?}", StatusCode::OK),
                    format!("{:?}", StatusCode::CREATED)
                ]
            );
        }
        other => panic!("expected NoRouteMatched, got {other:?}"),
    }
}

#[test]
fn test_should_fail_on_duplicate_attribute() {
    let result = dispatch(
        status(),
        [
            on(StatusCode::OK).call(pass()),
            on(StatusCode::OK).call(pass()),
        ],
    );

    let err = result.unwrap_err();
    assert_eq!(err.attribute, format!("{:?}", StatusCode::OK));
}

#[test]
fn test_should_use_added_attribute_route() {
    let expected = Recorder::new();
    let other = Recorder::new();
    let tree = dispatch(status(), [on(StatusCode::OK).call(other.route())]).unwrap();

    let merged = tree.merge(on(StatusCode::CREATED).call(expected.route()));

    assert!(!merged.ptr_eq(&tree));
    assert_eq!(tree.len(), 1);
    assert!(merged.get(&StatusCode::OK).is_some());

    merged
        .execute(&mut response(StatusCode::CREATED), &MessageReader::default())
        .unwrap();
    assert_eq!(expected.hits(), 1);
    assert!(!other.was_called());
}

#[test]
fn test_should_use_added_wildcard_route() {
    let expected = Recorder::new();
    let tree = dispatch(status(), [on(StatusCode::OK).call(pass())]).unwrap();

    let merged = tree.merge(any_status().call(expected.route()));
    execute(&Route::from(merged), StatusCode::BAD_REQUEST).unwrap();

    assert_eq!(expected.hits(), 1);
    assert!(tree.wildcard().is_none());
}

#[test]
fn test_should_use_last_attribute_route() {
    let expected = Recorder::new();
    let other = Recorder::new();
    let tree = dispatch(status(), [on(StatusCode::OK).call(other.route())]).unwrap();

    let merged = tree.merge(on(StatusCode::OK).call(expected.route()));
    execute(&Route::from(merged), StatusCode::OK).unwrap();

    assert_eq!(expected.hits(), 1);
    assert!(!other.was_called());
}

#[test]
fn test_should_use_last_wildcard_route() {
    let expected = Recorder::new();
    let other = Recorder::new();
    let tree = dispatch(status(), [any_status().call(other.route())]).unwrap();

    let merged = tree.merge(vec![any_status().call(expected.route())]);
    execute(&Route::from(merged), StatusCode::ACCEPTED).unwrap();

    assert_eq!(expected.hits(), 1);
    assert!(!other.was_called());
}

#[test]
fn test_identical_merge_yields_new_instance() {
    let tree = dispatch(status(), [on(StatusCode::OK).call(pass())]).unwrap();
    let merged = tree.merge(on(StatusCode::OK).call(pass()));

    assert!(!merged.ptr_eq(&tree));
    assert_eq!(merged.keys().collect::<Vec<_>>(), tree.keys().collect::<Vec<_>>());
}

#[test]
fn test_should_merge_recursively() {
    let expected = Recorder::new();
    let other = Recorder::new();
    let left = dispatch(
        series(),
        [on(Series::Successful)
            .dispatch(dispatch(status(), [any_status().call(other.route())]).unwrap())],
    )
    .unwrap();
    let right = dispatch(
        series(),
        [on(Series::Successful).dispatch(
            dispatch(status(), [on(StatusCode::CREATED).call(expected.route())]).unwrap(),
        )],
    )
    .unwrap();

    let merged = left.merge(right);
    execute(&merged, StatusCode::CREATED).unwrap();
    assert_eq!(expected.hits(), 1);
    assert!(!other.was_called());

    // the left sub-tree's wildcard survives the merge
    execute(&merged, StatusCode::OK).unwrap();
    assert_eq!(other.hits(), 1);
}

#[test]
fn test_should_merge_wildcard_trees_recursively() {
    let created = Recorder::new();
    let ok = Recorder::new();
    let left = dispatch(
        series(),
        [any_series().dispatch(dispatch(status(), [on(StatusCode::OK).call(ok.route())]).unwrap())],
    )
    .unwrap();

    let merged = left.merge(any_series().dispatch(
        dispatch(status(), [on(StatusCode::CREATED).call(created.route())]).unwrap(),
    ));
    let route = Route::from(merged);

    execute(&route, StatusCode::OK).unwrap();
    execute(&route, StatusCode::CREATED).unwrap();
    assert_eq!(ok.hits(), 1);
    assert_eq!(created.hits(), 1);
}

#[test]
fn test_plain_route_only_fills_gaps() {
    let created = Recorder::new();
    let expected = Recorder::new();
    let left = dispatch(
        status(),
        [
            on(StatusCode::CREATED).call(created.route()),
            any_status().pass(),
        ],
    )
    .unwrap();

    let merged = left.merge(expected.route());
    assert!(matches!(merged, Route::Composite { .. }));

    execute(&merged, StatusCode::CREATED).unwrap();
    assert_eq!(created.hits(), 1);

    execute(&merged, StatusCode::OK).unwrap();
    assert!(!expected.was_called());
}

#[test]
fn test_plain_route_used_when_tree_does_not_resolve() {
    let created = Recorder::new();
    let expected = Recorder::new();
    let left = dispatch(status(), [on(StatusCode::CREATED).call(created.route())]).unwrap();

    let merged = left.merge(expected.route());

    execute(&merged, StatusCode::OK).unwrap();
    assert_eq!(expected.hits(), 1);
    assert!(!created.was_called());
}

#[test]
fn test_layered_tree_merges_past_plain_fallback() {
    let ok = Recorder::new();
    let created = Recorder::new();
    let base = dispatch(status(), [on(StatusCode::OK).call(ok.route())]).unwrap();

    let layered = base.merge(pass()).merge(Route::from(
        dispatch(status(), [on(StatusCode::CREATED).call(created.route())]).unwrap(),
    ));

    execute(&layered, StatusCode::CREATED).unwrap();
    execute(&layered, StatusCode::OK).unwrap();
    execute(&layered, StatusCode::ACCEPTED).unwrap();
    assert_eq!(created.hits(), 1);
    assert_eq!(ok.hits(), 1);
}

#[test]
fn test_should_fall_back_on_different_navigator() {
    let created = Recorder::new();
    let expected = Recorder::new();
    let left = dispatch(status(), [on(StatusCode::CREATED).call(created.route())]).unwrap();
    let right = dispatch(
        series(),
        [on(Series::ClientError).call(expected.route())],
    )
    .unwrap();

    let merged = left.merge(right);

    execute(&merged, StatusCode::NOT_FOUND).unwrap();
    execute(&merged, StatusCode::CREATED).unwrap();
    assert_eq!(expected.hits(), 1);
    assert_eq!(created.hits(), 1);

    let err = execute(&merged, StatusCode::OK).unwrap_err();
    assert!(matches!(err, RouteError::NoRouteMatched(_)));
}

#[test]
fn test_unequal_navigators_do_not_merge_recursively() {
    let by_etag = dispatch(header(ETAG), [on(Some("v1".to_string())).call(pass())]).unwrap();
    let by_location =
        dispatch(header(LOCATION), [on(Some("/next".to_string())).call(pass())]).unwrap();
    let same = dispatch(
        header(HeaderName::from_static("etag")),
        [on(None).call(pass())],
    )
    .unwrap();

    assert!(matches!(by_etag.merge(by_location), Route::Composite { .. }));
    assert!(matches!(by_etag.merge(same), Route::Nested(_)));
}

#[test]
fn test_navigator_io_error_propagates_unwrapped() {
    let tree = dispatch(status(), [any_status().call(pass())]).unwrap();
    let mut broken = BrokenResponse::new(io::ErrorKind::ConnectionReset);

    let err = tree
        .execute(&mut broken, &MessageReader::default())
        .unwrap_err();

    let io = err.as_io().expect("transport error");
    assert_eq!(io.kind(), io::ErrorKind::ConnectionReset);
    assert_eq!(io.to_string(), "connection reset by peer");
}

#[test]
fn test_route_io_error_propagates_unwrapped() {
    let tree = dispatch(
        status(),
        [on(StatusCode::OK).call(failing_route(io::ErrorKind::UnexpectedEof))],
    )
    .unwrap();

    let err = tree
        .execute(&mut response(StatusCode::OK), &MessageReader::default())
        .unwrap_err();

    assert!(matches!(err, RouteError::Io(ref e) if e.kind() == io::ErrorKind::UnexpectedEof));
}

#[test]
fn test_tree_is_shared_across_threads() {
    let hits = Recorder::new();
    let tree = dispatch(
        series(),
        [
            on(Series::Successful).call(hits.route()),
            any_series().pass(),
        ],
    )
    .unwrap();

    thread::scope(|scope| {
        for _ in 0..4 {
            let tree = tree.clone();
            scope.spawn(move || {
                for code in [StatusCode::OK, StatusCode::NOT_FOUND] {
                    tree.execute(&mut response(code), &MessageReader::default())
                        .unwrap();
                }
            });
        }
    });

    assert_eq!(hits.hits(), 4);
}
