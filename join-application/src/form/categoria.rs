use super::{Draft, EntityFormService, FormField, FormGroup, ReadOnly};
use join_domain::entity::NullId;
use join_domain::{Categoria, CategoriaId, NewCategoria};
use validator::{Validate, ValidationErrors};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoriaFormInput {
    pub id: Option<CategoriaId>,
    pub nome: Option<String>,
}

impl From<Categoria> for CategoriaFormInput {
    fn from(categoria: Categoria) -> Self {
        Self {
            id: Some(categoria.id),
            nome: categoria.nome,
        }
    }
}

impl From<NewCategoria> for CategoriaFormInput {
    fn from(categoria: NewCategoria) -> Self {
        Self {
            id: None,
            nome: categoria.nome,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct CategoriaFormValues {
    #[validate(required)]
    pub nome: Option<String>,
}

const CATEGORIA_FIELDS: &[FormField] = &[
    FormField {
        name: "id",
        required: false,
        disabled: true,
    },
    FormField {
        name: "nome",
        required: true,
        disabled: false,
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct CategoriaFormGroup {
    id: ReadOnly<CategoriaId>,
    values: CategoriaFormValues,
}

impl CategoriaFormGroup {
    pub fn id(&self) -> &ReadOnly<CategoriaId> {
        &self.id
    }

    pub fn values(&self) -> &CategoriaFormValues {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut CategoriaFormValues {
        &mut self.values
    }
}

impl FormGroup for CategoriaFormGroup {
    fn fields(&self) -> &'static [FormField] {
        CATEGORIA_FIELDS
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        self.values.validate()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CategoriaFormService;

impl EntityFormService for CategoriaFormService {
    type Entity = Categoria;
    type Input = CategoriaFormInput;
    type Group = CategoriaFormGroup;

    fn create_form_group(&self, input: CategoriaFormInput) -> CategoriaFormGroup {
        CategoriaFormGroup {
            id: ReadOnly::new(input.id),
            values: CategoriaFormValues { nome: input.nome },
        }
    }

    fn get_entity(&self, form: &CategoriaFormGroup) -> Draft<Categoria, NewCategoria> {
        let nome = form.values.nome.clone();
        match form.id.value() {
            Some(id) => Draft::Persisted(Categoria { id: *id, nome }),
            None => Draft::New(NewCategoria { id: NullId, nome }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use join_domain::samples;

    #[test]
    fn round_trip_and_reset() {
        let service = CategoriaFormService;
        let categoria = samples::categoria::sample_with_partial_data();
        let mut form = service.create_form_group(categoria.clone().into());
        assert_eq!(service.get_entity(&form), Draft::Persisted(categoria));

        let novo = samples::categoria::sample_with_new_data();
        service.reset_form(&mut form, novo.clone().into());
        assert_eq!(service.get_entity(&form), Draft::New(novo));
    }

    #[test]
    fn nome_is_required() {
        let form = CategoriaFormService.create_form_group(CategoriaFormInput::default());
        assert_eq!(form.invalid_fields(), vec!["nome"]);
    }
}
