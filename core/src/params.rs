//! Query parameter groups shared by several endpoints.

/// Offset pagination for list endpoints. Defaults to `skip=0&limit=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u32,
    pub limit: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self { skip: 0, limit: 100 }
    }
}

impl Page {
    pub fn new(skip: u32, limit: u32) -> Self {
        Self { skip, limit }
    }

    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        vec![("skip", self.skip.to_string()), ("limit", self.limit.to_string())]
    }
}

/// Optional year/month filter. Unset fields are left out of the query,
/// which the service reads as "no filter".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Period {
    pub ano: Option<i32>,
    pub mes: Option<u32>,
}

impl Period {
    /// No filter at all.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn month(ano: i32, mes: u32) -> Self {
        Self {
            ano: Some(ano),
            mes: Some(mes),
        }
    }

    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(ano) = self.ano {
            pairs.push(("ano", ano.to_string()));
        }
        if let Some(mes) = self.mes {
            pairs.push(("mes", mes.to_string()));
        }
        pairs
    }
}
