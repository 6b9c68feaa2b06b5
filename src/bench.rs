#[doc(hidden)]
#[macro_export]
macro_rules! benches {
    ($params:path) => {
    };
}
