/// Shorthand way to create a Tag::Compound.
/// Example:
/// ```
/// use mcchunk::{compound, Tag};
/// let tag = compound!{
///     ("Item One", 0i8),
///     (String::from("Item Two"), 2i32),
///     ("Item Three", Tag::Byte(1))
/// };
/// assert_eq!(tag.get("Item Two"), Some(&Tag::Int(2)));
/// ```
#[macro_export]
macro_rules! compound {
    ($(($name:expr, $value:expr)),+$(,)?) => {
        $crate::nbt::tag::Tag::Compound($crate::nbt::Map::from([
            $(
                (::std::string::String::from($name), $crate::nbt::tag::Tag::from($value)),
            )+
        ]))
    };
    () => {
        $crate::nbt::tag::Tag::Compound($crate::nbt::Map::new())
    };
}

/// Shorthand way to create a Tag::List.
/// Every item must have the same type.
/// Example:
/// ```
/// use mcchunk::{list, Tag, ListTag};
/// assert_eq!(list![1i32, 2, 3], Tag::List(ListTag::Int(vec![1, 2, 3])));
/// assert_eq!(list!["One", "Two"].as_list().map(ListTag::len), Some(2));
/// assert_eq!(list![0i8; 4], Tag::List(ListTag::Byte(vec![0; 4])));
/// ```
#[macro_export]
macro_rules! list {
    ($($item:expr),+$(,)?) => {
        $crate::nbt::tag::Tag::List($crate::nbt::tag::ListTag::from(::std::vec![
            $($item,)+
        ]))
    };
    ($value:expr; $repititions:expr) => {
        $crate::nbt::tag::Tag::List($crate::nbt::tag::ListTag::from(::std::vec![$value; $repititions]))
    };
    () => {
        $crate::nbt::tag::Tag::List($crate::nbt::tag::ListTag::End)
    };
}
