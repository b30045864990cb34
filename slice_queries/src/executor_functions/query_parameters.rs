use crate::executor_functions::query_value::{length_u16, QueryValue};
use crate::slice_functions::consistency::Consistency;
use byteorder::{BigEndian, WriteBytesExt};
use std::io;

pub const FLAG_VALUES: u8 = 0x01;
pub const FLAG_PAGE_SIZE: u8 = 0x04;
pub const FLAG_NAMES_FOR_VALUES: u8 = 0x40;

#[derive(Debug, Clone, PartialEq)]
pub struct QueryParameters {
    pub consistency: Consistency,        // Nivel de consistencia
    pub flags: u8,                       // Flags que definen las opciones de la consulta
    pub values: Option<Vec<QueryValue>>, // Valores si el flag 0x01 está presente
    pub result_page_size: Option<i32>,   // Tamaño de la página
}

impl QueryParameters {
    pub fn new(consistency: Consistency) -> Self {
        QueryParameters {
            consistency,
            flags: 0,
            values: None,
            result_page_size: None,
        }
    }

    /// Agrega los valores ligados; si todos tienen nombre se marca el flag 0x40.
    pub fn with_values(mut self, values: Vec<QueryValue>) -> Self {
        if values.is_empty() {
            return self;
        }
        self.flags |= FLAG_VALUES;
        if values.iter().all(|v| v.name.is_some()) {
            self.flags |= FLAG_NAMES_FOR_VALUES;
        }
        self.values = Some(values);
        self
    }

    pub fn with_page_size(mut self, page_size: i32) -> Self {
        self.flags |= FLAG_PAGE_SIZE;
        self.result_page_size = Some(page_size);
        self
    }

    /// Serializa los parámetros de consulta en un vector de bytes.
    pub fn serialize(&self) -> io::Result<Vec<u8>> {
        let mut bytes = vec![];
        bytes.write_u16::<BigEndian>(self.consistency.code())?;
        bytes.push(self.flags);

        if let Some(values) = &self.values {
            bytes.write_u16::<BigEndian>(length_u16("bound values", values.len())?)?;
            let with_names = self.flags & FLAG_NAMES_FOR_VALUES != 0;
            for value in values {
                value.serialize(with_names, &mut bytes)?;
            }
        }
        if let Some(page_size) = self.result_page_size {
            bytes.write_i32::<BigEndian>(page_size)?;
        }
        Ok(bytes)
    }
}
