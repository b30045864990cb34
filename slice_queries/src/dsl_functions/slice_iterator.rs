use crate::error::ErrorType;
use std::iter::FusedIterator;

/// Secuencia perezosa de filas sobre el cursor del ejecutor.
///
/// Se recorre una sola vez y hacia adelante. Después de un error no devuelve
/// más filas. Si se abandona antes de terminar no hace falta cerrarla: el
/// estado de paginación es del ejecutor.
pub struct SliceIterator<C> {
    cursor: C,
    terminado: bool,
}

impl<C> SliceIterator<C> {
    pub fn new(cursor: C) -> Self {
        SliceIterator {
            cursor,
            terminado: false,
        }
    }
}

impl<R, C> Iterator for SliceIterator<C>
where
    C: Iterator<Item = Result<R, ErrorType>>,
{
    type Item = Result<R, ErrorType>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.terminado {
            return None;
        }
        match self.cursor.next() {
            Some(Ok(fila)) => Some(Ok(fila)),
            Some(Err(e)) => {
                self.terminado = true;
                Some(Err(e))
            }
            None => {
                self.terminado = true;
                None
            }
        }
    }
}

impl<R, C> FusedIterator for SliceIterator<C> where C: Iterator<Item = Result<R, ErrorType>> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_after_the_first_error() {
        let cursor = vec![
            Ok(1),
            Err(ErrorType::InvalidArgument("página perdida".to_string())),
            Ok(2),
        ];
        let mut filas = SliceIterator::new(cursor.into_iter());

        assert!(matches!(filas.next(), Some(Ok(1))));
        assert!(matches!(filas.next(), Some(Err(_))));
        assert!(filas.next().is_none());
        assert!(filas.next().is_none());
    }

    #[test]
    fn yields_every_row_in_order() {
        let cursor = (1..=4).map(Ok::<i32, ErrorType>);
        let filas: Result<Vec<_>, _> = SliceIterator::new(cursor).collect();
        assert_eq!(filas.unwrap(), vec![1, 2, 3, 4]);
    }
}
