use super::{Draft, EntityFormService, FormField, FormGroup, ReadOnly};
use join_domain::entity::NullId;
use join_domain::{CategoriaRef, NewProduto, Produto, ProdutoId};
use validator::{Validate, ValidationErrors};

/// Produto 表单输入：已有实体或仅部分字段的新建输入
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProdutoFormInput {
    pub id: Option<ProdutoId>,
    pub nome: Option<String>,
    pub quantidade: Option<i32>,
    pub categoria: Option<CategoriaRef>,
}

impl From<Produto> for ProdutoFormInput {
    fn from(produto: Produto) -> Self {
        Self {
            id: Some(produto.id),
            nome: produto.nome,
            quantidade: produto.quantidade,
            categoria: produto.categoria,
        }
    }
}

impl From<NewProduto> for ProdutoFormInput {
    fn from(produto: NewProduto) -> Self {
        Self {
            id: None,
            nome: produto.nome,
            quantidade: produto.quantidade,
            categoria: produto.categoria,
        }
    }
}

/// 可编辑字段，三者在表单中均为必填
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct ProdutoFormValues {
    #[validate(required)]
    pub nome: Option<String>,
    #[validate(required)]
    pub quantidade: Option<i32>,
    #[validate(required)]
    pub categoria: Option<CategoriaRef>,
}

const PRODUTO_FIELDS: &[FormField] = &[
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
    FormField {
        name: "quantidade",
        required: true,
        disabled: false,
    },
    FormField {
        name: "categoria",
        required: true,
        disabled: false,
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct ProdutoFormGroup {
    id: ReadOnly<ProdutoId>,
    values: ProdutoFormValues,
}

impl ProdutoFormGroup {
    pub fn id(&self) -> &ReadOnly<ProdutoId> {
        &self.id
    }

    pub fn values(&self) -> &ProdutoFormValues {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut ProdutoFormValues {
        &mut self.values
    }
}

impl FormGroup for ProdutoFormGroup {
    fn fields(&self) -> &'static [FormField] {
        PRODUTO_FIELDS
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        self.values.validate()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProdutoFormService;

impl EntityFormService for ProdutoFormService {
    type Entity = Produto;
    type Input = ProdutoFormInput;
    type Group = ProdutoFormGroup;

    fn create_form_group(&self, input: ProdutoFormInput) -> ProdutoFormGroup {
        ProdutoFormGroup {
            id: ReadOnly::new(input.id),
            values: ProdutoFormValues {
                nome: input.nome,
                quantidade: input.quantidade,
                categoria: input.categoria,
            },
        }
    }

    fn get_entity(&self, form: &ProdutoFormGroup) -> Draft<Produto, NewProduto> {
        let values = form.values.clone();
        match form.id.value() {
            Some(id) => Draft::Persisted(Produto {
                id: *id,
                nome: values.nome,
                quantidade: values.quantidade,
                categoria: values.categoria,
            }),
            None => Draft::New(NewProduto {
                id: NullId,
                nome: values.nome,
                quantidade: values.quantidade,
                categoria: values.categoria,
            }),
        }
    }
}
