//! Macro for convenient Cypher query construction.

/// Macro for inline Cypher queries with optional parameters.
///
/// This macro provides a shorthand for creating and parameterizing queries.
///
/// # Usage
///
/// ```ignore
/// use exero::graph::cypher;
///
/// // Query without parameters
/// let query = cypher!(session, "MATCH (e:Exercise) RETURN e");
///
/// // Query with parameters
/// let query = cypher!(session, "MATCH (e:Exercise { id: $id }) RETURN e", id = exercise_id);
///
/// // Multiple parameters
/// let query = cypher!(
///     session,
///     "MATCH (e:Exercise { id: $id, name: $name }) RETURN e",
///     id = exercise_id,
///     name = exercise_name
/// );
///
/// // Execute the query
/// let rows = query.fetch_all().await?;
/// ```
#[macro_export]
macro_rules! cypher {
    // Query without parameters
    ($session:expr, $query:expr) => {
        $session.query($query)
    };
    // Query with parameters
    ($session:expr, $query:expr, $($name:ident = $value:expr),+ $(,)?) => {
        $session.query($query)$(.param(stringify!($name), $value))+
    };
}
