use crate::error::ErrorType;
use crate::slice_functions::value::Value;
use byteorder::{BigEndian, WriteBytesExt};
use std::io;

#[derive(Debug, Clone, PartialEq)]
pub struct QueryValue {
    pub name: Option<String>,   // Nombre del valor si el flag 0x40 está presente
    pub value: Option<Vec<u8>>, // Valor serializado, `None` para null
}

impl QueryValue {
    /// Serializa un `Value` con el formato de valores del protocolo nativo.
    pub fn from_value(name: Option<String>, value: &Value) -> Result<Self, ErrorType> {
        Ok(QueryValue {
            name,
            value: encode_value(value)?,
        })
    }

    // Serializar `QueryValue`
    pub fn serialize(&self, with_name: bool, bytes: &mut Vec<u8>) -> io::Result<()> {
        if with_name {
            let name = self.name.as_deref().unwrap_or_default();
            bytes.write_u16::<BigEndian>(length_u16("value name", name.len())?)?;
            bytes.extend_from_slice(name.as_bytes());
        }
        match &self.value {
            Some(value) => {
                bytes.write_i32::<BigEndian>(length_i32("value", value.len())?)?;
                bytes.extend_from_slice(value);
            }
            None => bytes.write_i32::<BigEndian>(-1)?,
        }
        Ok(())
    }
}

fn encode_value(value: &Value) -> Result<Option<Vec<u8>>, ErrorType> {
    let mut bytes = Vec::new();
    let escrito = match value {
        Value::Null => return Ok(None),
        Value::Text(texto) => {
            bytes.extend_from_slice(texto.as_bytes());
            Ok(())
        }
        Value::Int(numero) => bytes.write_i32::<BigEndian>(*numero),
        Value::BigInt(numero) => bytes.write_i64::<BigEndian>(*numero),
        Value::Boolean(valor) => bytes.write_u8(u8::from(*valor)),
        Value::Double(numero) => bytes.write_f64::<BigEndian>(*numero),
        Value::Uuid(id) => {
            bytes.extend_from_slice(id.as_bytes());
            Ok(())
        }
        Value::Timestamp(fecha) => bytes.write_i64::<BigEndian>(fecha.timestamp_millis()),
        Value::List(valores) => encode_list(valores, &mut bytes),
    };
    escrito.map_err(|e| ErrorType::InvalidArgument(format!("value {}: {}", value, e)))?;
    Ok(Some(bytes))
}

// [int n] seguido de cada elemento como [int largo][bytes]
fn encode_list(valores: &[Value], bytes: &mut Vec<u8>) -> io::Result<()> {
    bytes.write_i32::<BigEndian>(length_i32("list", valores.len())?)?;
    for valor in valores {
        let elemento = encode_value(valor)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
        QueryValue {
            name: None,
            value: elemento,
        }
        .serialize(false, bytes)?;
    }
    Ok(())
}

/// Largo como `[short]`; falla en vez de truncar.
pub(crate) fn length_u16(campo: &str, largo: usize) -> io::Result<u16> {
    u16::try_from(largo).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{}: {} does not fit in a [short]", campo, largo),
        )
    })
}

/// Largo como `[int]`; falla en vez de truncar.
pub(crate) fn length_i32(campo: &str, largo: usize) -> io::Result<i32> {
    i32::try_from(largo).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{}: {} does not fit in an [int]", campo, largo),
        )
    })
}
