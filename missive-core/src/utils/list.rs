/// Converte un valore opzionale in una lista di zero o un elemento.
pub fn to_list<T>(value: Option<T>) -> Vec<T> {
    value.into_iter().collect()
}
