/// Logical keys understood by the games, independent of the frontend's
/// keyboard API.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Key {
    A,
    D,
    Left,
    Right,
    Space,
    Escape,
    None,
}
