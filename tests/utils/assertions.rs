//! Custom assertions for campaign testing

/// Assert a `try_` client call failed with the given contract error
#[macro_export]
macro_rules! assert_contract_error {
    ($result:expr, $expected_error:expr) => {
        match $result {
            Err(Ok(err)) => assert_eq!(err, $expected_error, "Contract error mismatch"),
            Err(Err(invoke)) => panic!("Expected contract error, host failed with {:?}", invoke),
            Ok(_) => panic!("Expected contract error but succeeded"),
        }
    };
    ($result:expr, $expected_error:expr, $($msg:tt)*) => {
        match $result {
            Err(Ok(err)) => assert_eq!(err, $expected_error, $($msg)*),
            Err(Err(invoke)) => panic!("Expected contract error, host failed with {:?}", invoke),
            Ok(_) => panic!("Expected contract error but succeeded"),
        }
    };
}

/// Assert every balance matches its snapshot
pub fn assert_balances_restored(starting: &[i128], ending: &[i128]) {
    assert_eq!(starting.len(), ending.len(), "Snapshot length mismatch");
    for (i, (before, after)) in starting.iter().zip(ending.iter()).enumerate() {
        assert_eq!(before, after, "Balance {} was not restored", i);
    }
}
