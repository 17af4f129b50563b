/// Builds a [`HostValue`](crate::HostValue) from a JSON-like literal.
///
/// `null` is nil, `[...]` is an array, `{"key": value}` is a hash with
/// string keys. Anything else goes through `HostValue::from`.
///
/// ```rust
/// use toml_bridge::{host, HostValue};
///
/// let value = host!({
///     "name": "demo",
///     "ports": [80, 443],
///     "debug": false,
///     "parent": null
/// });
/// assert_eq!(value.get("debug"), Some(&HostValue::Bool(false)));
/// ```
#[macro_export]
macro_rules! host {
    (null) => {
        $crate::HostValue::Nil
    };

    (true) => {
        $crate::HostValue::Bool(true)
    };

    (false) => {
        $crate::HostValue::Bool(false)
    };

    ([]) => {
        $crate::HostValue::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::HostValue::Array(vec![$($crate::host!($elem)),*])
    };

    ({}) => {
        $crate::HostValue::Hash($crate::HostHash::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut hash = $crate::HostHash::new();
        $(
            hash.insert($crate::HostKey::from($key), $crate::host!($value));
        )*
        $crate::HostValue::Hash(hash)
    }};

    ($e:expr) => {
        $crate::HostValue::from($e)
    };
}
